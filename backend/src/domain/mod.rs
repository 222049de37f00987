//! # Domain Module
//!
//! Business logic of the revenue distribution service, independent of the
//! storage backend and of the HTTP surface.
//!
//! ## Module Organization
//!
//! - **allocation**: performance weights and proportional split of the pool
//! - **distribution_service**: the distribution builder and record reads
//! - **commands**: internal command, query and result types
//! - **models**: employees, attendance, shifts, invoices, fiscal months and
//!   distribution records
//!
//! ## Business Rules
//!
//! - The allocated pool is a fixed share (default 30%) of the department's
//!   finalized revenue for the month
//! - An employee's weight is one point per day present plus half a point per
//!   shift assignment
//! - Only employees that are Active at computation time take part
//! - Recomputing a month replaces its line items; it never duplicates a record

pub mod allocation;
pub mod commands;
pub mod distribution_service;
pub mod models;

pub use distribution_service::*;
