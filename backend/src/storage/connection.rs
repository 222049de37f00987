use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::storage::repositories::{
    AttendanceRepository, DistributionRepository, EmployeeRepository, RevenueRepository,
    ShiftRepository,
};
use crate::storage::traits::Connection;

/// DbConnection owns the SQLite pool shared by every repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Source tables: cost centers and the invoices posted against them
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cost_centers (
                name TEXT PRIMARY KEY,
                department TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_cost_centers_department
            ON cost_centers(department);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sales_invoices (
                name TEXT PRIMARY KEY,
                cost_center TEXT NOT NULL,
                posting_date TEXT NOT NULL,
                grand_total REAL NOT NULL,
                docstatus INTEGER NOT NULL DEFAULT 0 CHECK (docstatus IN (0, 1, 2))
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_sales_invoices_posting
            ON sales_invoices(cost_center, posting_date);
            "#,
        )
        .execute(pool)
        .await?;

        // Employee directory
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                name TEXT PRIMARY KEY,
                employee_name TEXT NOT NULL,
                department TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Active'
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_employees_department_status
            ON employees(department, status);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attendance (
                name TEXT PRIMARY KEY,
                employee TEXT NOT NULL,
                attendance_date TEXT NOT NULL,
                status TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_attendance_employee_date
            ON attendance(employee, attendance_date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shift_assignments (
                name TEXT PRIMARY KEY,
                employee TEXT NOT NULL,
                shift_type TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_shift_assignments_employee_start
            ON shift_assignments(employee, start_date);
            "#,
        )
        .execute(pool)
        .await?;

        // Distribution records and their line items
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS revenue_distributions (
                name TEXT PRIMARY KEY,
                department TEXT NOT NULL,
                fiscal_month TEXT NOT NULL,
                total_department_revenue REAL NOT NULL DEFAULT 0,
                allocated_pool REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (department, fiscal_month)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS revenue_distribution_items (
                parent TEXT NOT NULL,
                idx INTEGER NOT NULL,
                employee TEXT NOT NULL,
                present_days INTEGER NOT NULL DEFAULT 0,
                shifts_count INTEGER NOT NULL DEFAULT 0,
                performance_weight REAL NOT NULL DEFAULT 0,
                base_share REAL NOT NULL DEFAULT 0,
                final_share REAL NOT NULL DEFAULT 0,
                notes TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (parent, idx),
                FOREIGN KEY (parent) REFERENCES revenue_distributions (name) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type RevenueRepository = RevenueRepository;
    type AttendanceRepository = AttendanceRepository;
    type ShiftRepository = ShiftRepository;
    type EmployeeRepository = EmployeeRepository;
    type DistributionRepository = DistributionRepository;

    fn create_revenue_repository(&self) -> Self::RevenueRepository {
        RevenueRepository::new(self.clone())
    }

    fn create_attendance_repository(&self) -> Self::AttendanceRepository {
        AttendanceRepository::new(self.clone())
    }

    fn create_shift_repository(&self) -> Self::ShiftRepository {
        ShiftRepository::new(self.clone())
    }

    fn create_employee_repository(&self) -> Self::EmployeeRepository {
        EmployeeRepository::new(self.clone())
    }

    fn create_distribution_repository(&self) -> Self::DistributionRepository {
        DistributionRepository::new(self.clone())
    }
}
