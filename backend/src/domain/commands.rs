//! Domain-level command and query types
//! These structs are used by services inside the domain layer and by the
//! storage traits. They are **not** exposed over the public API; the REST
//! layer maps the DTOs of the `shared` crate to these internal types.

pub mod lookups {
    use crate::domain::models::DateRange;

    /// Revenue of one department's cost centers within an inclusive period.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RevenueQuery {
        pub department: String,
        pub period: DateRange,
    }

    /// "Present" attendance of one employee within an inclusive period.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AttendanceQuery {
        pub employee: String,
        pub period: DateRange,
    }

    /// Shift assignments of one employee starting within an inclusive period.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ShiftQuery {
        pub employee: String,
        pub period: DateRange,
    }
}

pub mod distribution {
    use crate::domain::models::{Distribution, FiscalMonth};

    /// Input for building (or rebuilding) a department distribution.
    #[derive(Debug, Clone)]
    pub struct BuildDistributionCommand {
        pub department: String,
        /// Raw "YYYY-MM" string, validated by the service
        pub month: String,
    }

    /// Result of a build: the record identifier and its money totals.
    #[derive(Debug, Clone, PartialEq)]
    pub struct BuildDistributionResult {
        pub name: String,
        pub total_department_revenue: f64,
        pub allocated_pool: f64,
    }

    impl From<&Distribution> for BuildDistributionResult {
        fn from(record: &Distribution) -> Self {
            Self {
                name: record.name.clone(),
                total_department_revenue: record.total_department_revenue,
                allocated_pool: record.allocated_pool,
            }
        }
    }

    /// Filters for listing persisted distributions.
    #[derive(Debug, Clone, Default)]
    pub struct DistributionListQuery {
        pub department: Option<String>,
        pub fiscal_month: Option<FiscalMonth>,
    }

    #[derive(Debug, Clone)]
    pub struct DistributionListResult {
        pub distributions: Vec<BuildDistributionResult>,
    }
}
