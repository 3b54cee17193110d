//! Payroll Processing & Approval Engine
//!
//! This crate computes payroll breakdowns from raw salary and attendance
//! inputs, drives each record through a role-gated approval lifecycle,
//! coordinates bulk transitions with per-record isolation, and converts
//! records to and from a flat CSV representation and payslip documents.

#![warn(missing_docs)]

pub mod api;
pub mod bulk;
pub mod calculation;
pub mod config;
pub mod error;
pub mod flatfile;
pub mod models;
pub mod payslip;
pub mod store;
pub mod workflow;
