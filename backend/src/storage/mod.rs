//! # Storage Module
//!
//! Handles all data persistence for the revenue distribution service.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! implementation lives in [`connection`] and [`repositories`] and can be
//! swapped for another backend without touching the distribution logic.
//!
//! ## Tables
//!
//! - **Sources**: cost centers, sales invoices, employees, attendance and
//!   shift assignments. These are read by the lookups.
//! - **Results**: distribution records and their line items, written by the
//!   distribution builder in a single transaction.

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{
    AttendanceRepository, DistributionRepository, EmployeeRepository, RevenueRepository,
    ShiftRepository,
};
pub use traits::{
    AttendanceStorage, Connection, DistributionStorage, EmployeeStorage, RevenueStorage,
    ShiftStorage, SystemWrite,
};
