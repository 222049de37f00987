//! Department revenue distribution builder.
//!
//! Builds (or rebuilds) the distribution record of one department for one
//! fiscal month:
//!
//! 1. Resolve the month into its first and last calendar day
//! 2. Load the existing record for (department, month) and clear its items,
//!    or start a new one
//! 3. Look up the department revenue and derive the allocated pool
//! 4. Count attendance and shifts for every currently active employee
//! 5. Split the pool in proportion to each employee's performance weight
//! 6. Save the record with a system write and return its summary
//!
//! Lookups run one after another; there is no internal parallelism. Two
//! concurrent builds for the same key race and the last save wins.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::DistributionConfig;
use crate::domain::allocation::{self, EmployeeTally};
use crate::domain::commands::distribution::{
    BuildDistributionCommand, BuildDistributionResult, DistributionListQuery, DistributionListResult,
};
use crate::domain::commands::lookups::{AttendanceQuery, RevenueQuery, ShiftQuery};
use crate::domain::models::{Distribution, FiscalMonth, FiscalMonthError};
use crate::storage::traits::{
    AttendanceStorage, Connection, DistributionStorage, EmployeeStorage, RevenueStorage,
    ShiftStorage, SystemWrite,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    #[error("Department cannot be empty")]
    EmptyDepartment,
    #[error(transparent)]
    InvalidMonth(#[from] FiscalMonthError),
}

/// Service that builds and reads department revenue distributions
#[derive(Clone)]
pub struct DistributionService<C: Connection> {
    revenue_repository: C::RevenueRepository,
    attendance_repository: C::AttendanceRepository,
    shift_repository: C::ShiftRepository,
    employee_repository: C::EmployeeRepository,
    distribution_repository: C::DistributionRepository,
    config: DistributionConfig,
}

impl<C: Connection> DistributionService<C> {
    /// Create a new DistributionService with the default 30% pool ratio
    pub fn new(connection: &C) -> Self {
        Self::with_config(connection, DistributionConfig::default())
    }

    pub fn with_config(connection: &C, config: DistributionConfig) -> Self {
        Self {
            revenue_repository: connection.create_revenue_repository(),
            attendance_repository: connection.create_attendance_repository(),
            shift_repository: connection.create_shift_repository(),
            employee_repository: connection.create_employee_repository(),
            distribution_repository: connection.create_distribution_repository(),
            config,
        }
    }

    /// Build or rebuild the distribution of a department for a fiscal month
    pub async fn build_department_distribution(
        &self,
        command: BuildDistributionCommand,
    ) -> Result<BuildDistributionResult> {
        info!(
            "Building revenue distribution for department '{}' month '{}'",
            command.department, command.month
        );

        let department = command.department.trim();
        if department.is_empty() {
            return Err(DistributionError::EmptyDepartment.into());
        }
        let fiscal_month: FiscalMonth = command
            .month
            .parse()
            .map_err(DistributionError::InvalidMonth)?;
        let period = fiscal_month.date_range();
        debug!("Distribution period: {} to {}", period.start, period.end);

        let now = Utc::now().to_rfc3339();
        let mut distribution = match self
            .distribution_repository
            .find_distribution_name(department, &fiscal_month)
            .await?
        {
            Some(name) => match self.distribution_repository.get_distribution(&name).await? {
                Some(mut existing) => {
                    info!(
                        "Recomputing existing distribution {} ({} previous items)",
                        existing.name,
                        existing.items.len()
                    );
                    existing.clear_items();
                    existing.updated_at = now;
                    existing
                }
                None => {
                    warn!("Distribution {} vanished between lookup and load, recreating", name);
                    Distribution::new(department, fiscal_month, now)
                }
            },
            None => {
                info!("Creating new distribution for {} {}", department, fiscal_month);
                Distribution::new(department, fiscal_month, now)
            }
        };

        let total_revenue = self
            .revenue_repository
            .department_revenue(&RevenueQuery {
                department: department.to_string(),
                period,
            })
            .await?;
        distribution.total_department_revenue = total_revenue;
        distribution.allocated_pool = allocation::allocated_pool(total_revenue, self.config.pool_ratio);
        info!(
            "Department revenue {:.2}, allocated pool {:.2}",
            distribution.total_department_revenue, distribution.allocated_pool
        );

        // Eligibility is "Active right now", not "active during the period"
        let employees = self.employee_repository.list_active_employees(department).await?;
        info!("Found {} active employees in {}", employees.len(), department);

        let mut tallies = Vec::with_capacity(employees.len());
        for employee in employees {
            let present_days = self
                .attendance_repository
                .count_present_days(&AttendanceQuery {
                    employee: employee.name.clone(),
                    period,
                })
                .await?;
            let shifts_count = self
                .shift_repository
                .count_shifts(&ShiftQuery {
                    employee: employee.name.clone(),
                    period,
                })
                .await?;
            debug!(
                "Employee {}: present_days={}, shifts_count={}",
                employee.name, present_days, shifts_count
            );
            tallies.push(EmployeeTally {
                employee: employee.name,
                present_days,
                shifts_count,
            });
        }

        let allocations = allocation::allocate(&tallies, distribution.allocated_pool);
        for share in allocations {
            distribution.append_item(
                share.employee,
                share.present_days,
                share.shifts_count,
                share.performance_weight,
                share.base_share,
                share.final_share,
            );
        }

        if distribution.total_weight() <= 0.0 && distribution.allocated_pool > 0.0 {
            warn!(
                "Total performance weight is zero for {} {}; pool of {:.2} left undistributed",
                department, fiscal_month, distribution.allocated_pool
            );
        }

        self.distribution_repository
            .save_distribution(&distribution, SystemWrite::grant())
            .await?;

        info!(
            "Saved distribution {} with {} items, distributed {:.2} of {:.2}",
            distribution.name,
            distribution.items.len(),
            distribution.total_final_share(),
            distribution.allocated_pool
        );

        Ok(BuildDistributionResult::from(&distribution))
    }

    /// Get a distribution record with its line items
    pub async fn get_distribution(&self, name: &str) -> Result<Option<Distribution>> {
        info!("Getting distribution: {}", name);

        let distribution = self.distribution_repository.get_distribution(name).await?;
        if distribution.is_none() {
            warn!("Distribution not found: {}", name);
        }

        Ok(distribution)
    }

    /// Get the distribution of a department for a "YYYY-MM" month
    pub async fn find_distribution(&self, department: &str, month: &str) -> Result<Option<Distribution>> {
        let fiscal_month: FiscalMonth = month.parse().map_err(DistributionError::InvalidMonth)?;

        match self
            .distribution_repository
            .find_distribution_name(department.trim(), &fiscal_month)
            .await?
        {
            Some(name) => self.distribution_repository.get_distribution(&name).await,
            None => Ok(None),
        }
    }

    /// List distribution summaries, newest month first
    pub async fn list_distributions(&self, query: DistributionListQuery) -> Result<DistributionListResult> {
        info!("Listing distributions: {:?}", query);

        let distributions = self.distribution_repository.list_distributions(&query).await?;
        info!("Found {} distributions", distributions.len());

        Ok(DistributionListResult {
            distributions: distributions.iter().map(BuildDistributionResult::from).collect(),
        })
    }
}


#[cfg(test)]
mod sqlite_tests {
    use super::*;
    use crate::domain::models::{
        AttendanceRecord, AttendanceStatus, CostCenter, DocStatus, Employee, EmployeeStatus,
        SalesInvoice, ShiftAssignment,
    };
    use crate::storage::{
        AttendanceRepository, DbConnection, EmployeeRepository, RevenueRepository, ShiftRepository,
    };
    use chrono::NaiveDate;

    struct Fixture {
        db: DbConnection,
        service: DistributionService<DbConnection>,
        employees: EmployeeRepository,
        attendance: AttendanceRepository,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        Fixture {
            service: DistributionService::new(&db),
            employees: EmployeeRepository::new(db.clone()),
            attendance: AttendanceRepository::new(db.clone()),
            db,
        }
    }

    fn october(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    async fn add_employee(fixture: &Fixture, name: &str, present_days: u32) {
        fixture
            .employees
            .store_employee(&Employee {
                name: name.to_string(),
                employee_name: name.to_string(),
                department: "Emergency".to_string(),
                status: EmployeeStatus::Active,
            })
            .await
            .unwrap();
        for day in 1..=present_days {
            fixture
                .attendance
                .store_attendance(&AttendanceRecord {
                    name: format!("ATT-{}-{}", name, day),
                    employee: name.to_string(),
                    attendance_date: october(day),
                    status: AttendanceStatus::Present,
                })
                .await
                .unwrap();
        }
    }

    async fn seed_revenue(fixture: &Fixture, amount: f64) {
        let revenue = RevenueRepository::new(fixture.db.clone());
        revenue
            .store_cost_center(&CostCenter {
                name: "Emergency - HC".to_string(),
                department: "Emergency".to_string(),
            })
            .await
            .unwrap();
        revenue
            .store_sales_invoice(&SalesInvoice {
                name: "SINV-ER-1".to_string(),
                cost_center: "Emergency - HC".to_string(),
                posting_date: october(20),
                grand_total: amount,
                docstatus: DocStatus::Submitted,
            })
            .await
            .unwrap();
    }

    fn command() -> BuildDistributionCommand {
        BuildDistributionCommand {
            department: "Emergency".to_string(),
            month: "2025-10".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_persists_record_with_items() {
        let fixture = setup_test().await;
        seed_revenue(&fixture, 40_000.0).await;
        add_employee(&fixture, "EMP-1", 6).await;
        add_employee(&fixture, "EMP-2", 3).await;
        ShiftRepository::new(fixture.db.clone())
            .store_shift_assignment(&ShiftAssignment {
                name: "SA-1".to_string(),
                employee: "EMP-2".to_string(),
                shift_type: "Night".to_string(),
                start_date: october(4),
                end_date: Some(october(4)),
            })
            .await
            .unwrap();

        let result = fixture.service.build_department_distribution(command()).await.unwrap();
        assert_eq!(result.allocated_pool, 40_000.0 * 0.30);

        let record = fixture.service.get_distribution(&result.name).await.unwrap().unwrap();
        assert_eq!(record.items.len(), 2);
        assert_eq!(record.items[0].performance_weight, 6.0);
        assert_eq!(record.items[1].performance_weight, 3.5);
        assert_eq!(record.items[1].shifts_count, 1);
        assert!((record.total_final_share() - record.allocated_pool).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent_and_tracks_active_set() {
        let fixture = setup_test().await;
        seed_revenue(&fixture, 12_000.0).await;
        add_employee(&fixture, "EMP-1", 4).await;
        add_employee(&fixture, "EMP-2", 4).await;

        let first = fixture.service.build_department_distribution(command()).await.unwrap();
        let first_record = fixture.service.get_distribution(&first.name).await.unwrap().unwrap();

        let second = fixture.service.build_department_distribution(command()).await.unwrap();
        let second_record = fixture.service.get_distribution(&second.name).await.unwrap().unwrap();
        assert_eq!(first.name, second.name);
        assert_eq!(first_record.items, second_record.items);
        assert_eq!(first_record.created_at, second_record.created_at);

        fixture
            .employees
            .update_employee_status("EMP-2", EmployeeStatus::Left)
            .await
            .unwrap();
        add_employee(&fixture, "EMP-3", 2).await;

        fixture.service.build_department_distribution(command()).await.unwrap();
        let third_record = fixture.service.get_distribution(&first.name).await.unwrap().unwrap();
        let employees: Vec<&str> = third_record.items.iter().map(|i| i.employee.as_str()).collect();
        assert_eq!(employees, vec!["EMP-1", "EMP-3"]);
        assert_eq!(third_record.items[0].final_share, 3_600.0 * 4.0 / 6.0);

        let listed = fixture
            .service
            .list_distributions(DistributionListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.distributions.len(), 1);
    }
}
