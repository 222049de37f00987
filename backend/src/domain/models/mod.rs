pub mod attendance;
pub mod distribution;
pub mod employee;
pub mod fiscal_month;
pub mod revenue;

pub use attendance::{AttendanceRecord, AttendanceStatus, ShiftAssignment};
pub use distribution::{Distribution, DistributionLineItem};
pub use employee::{Employee, EmployeeStatus};
pub use fiscal_month::{DateRange, FiscalMonth, FiscalMonthError};
pub use revenue::{CostCenter, DocStatus, SalesInvoice};
