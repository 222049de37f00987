//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. Every
//! lookup takes a typed query struct; nothing is filtered by field name.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::commands::distribution::DistributionListQuery;
use crate::domain::commands::lookups::{AttendanceQuery, RevenueQuery, ShiftQuery};
use crate::domain::models::{Distribution, Employee, FiscalMonth};

/// Capability for trusted, system-driven writes.
///
/// Saving a distribution bypasses user permission checks, so the store
/// demands this value instead of a boolean flag. It can only be minted
/// inside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemWrite {
    _private: (),
}

impl SystemWrite {
    pub(crate) fn grant() -> Self {
        Self { _private: () }
    }
}

/// Revenue source: finalized invoices attributed to a department's cost centers
#[async_trait]
pub trait RevenueStorage: Send + Sync {
    /// Sum of grand totals of submitted invoices in the period.
    /// Returns 0.0 when nothing matches.
    async fn department_revenue(&self, query: &RevenueQuery) -> Result<f64>;
}

/// Attendance source
#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    /// Count of "Present" attendance records in the period
    async fn count_present_days(&self, query: &AttendanceQuery) -> Result<u32>;
}

/// Shift assignment source
#[async_trait]
pub trait ShiftStorage: Send + Sync {
    /// Count of shift assignments starting in the period
    async fn count_shifts(&self, query: &ShiftQuery) -> Result<u32>;
}

/// Employee directory
#[async_trait]
pub trait EmployeeStorage: Send + Sync {
    /// Employees of the department whose status is currently Active, ordered by name
    async fn list_active_employees(&self, department: &str) -> Result<Vec<Employee>>;
}

/// Distribution record store
#[async_trait]
pub trait DistributionStorage: Send + Sync {
    /// Find the name of the record keyed by (department, month)
    async fn find_distribution_name(&self, department: &str, fiscal_month: &FiscalMonth) -> Result<Option<String>>;

    /// Load a record and its ordered line items
    async fn get_distribution(&self, name: &str) -> Result<Option<Distribution>>;

    /// List records (without items) matching the filters
    async fn list_distributions(&self, query: &DistributionListQuery) -> Result<Vec<Distribution>>;

    /// Insert or update the record and replace its line items atomically
    async fn save_distribution(&self, distribution: &Distribution, grant: SystemWrite) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories, so the domain layer can work
/// with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type RevenueRepository: RevenueStorage + Clone;
    type AttendanceRepository: AttendanceStorage + Clone;
    type ShiftRepository: ShiftStorage + Clone;
    type EmployeeRepository: EmployeeStorage + Clone;
    type DistributionRepository: DistributionStorage + Clone;

    fn create_revenue_repository(&self) -> Self::RevenueRepository;
    fn create_attendance_repository(&self) -> Self::AttendanceRepository;
    fn create_shift_repository(&self) -> Self::ShiftRepository;
    fn create_employee_repository(&self) -> Self::EmployeeRepository;
    fn create_distribution_repository(&self) -> Self::DistributionRepository;
}
