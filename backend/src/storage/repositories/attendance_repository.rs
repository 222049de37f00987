use anyhow::Result;
use async_trait::async_trait;

use crate::domain::commands::lookups::AttendanceQuery;
use crate::domain::models::{AttendanceRecord, AttendanceStatus};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AttendanceStorage;

/// Repository for daily attendance records
#[derive(Clone)]
pub struct AttendanceRepository {
    db: DbConnection,
}

impl AttendanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store or replace an attendance record
    pub async fn store_attendance(&self, record: &AttendanceRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO attendance (name, employee, attendance_date, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.name)
        .bind(&record.employee)
        .bind(record.attendance_date)
        .bind(record.status.as_str())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn count_present_days(&self, query: &AttendanceQuery) -> Result<u32> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM attendance
            WHERE employee = ?
              AND status = ?
              AND attendance_date BETWEEN ? AND ?
            "#,
        )
        .bind(&query.employee)
        .bind(AttendanceStatus::Present.as_str())
        .bind(query.period.start)
        .bind(query.period.end)
        .fetch_one(self.db.pool())
        .await?;

        Ok(u32::try_from(count)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::FiscalMonth;
    use chrono::NaiveDate;

    async fn setup_test() -> AttendanceRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AttendanceRepository::new(db)
    }

    fn record(name: &str, employee: &str, date: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            name: name.to_string(),
            employee: employee.to_string(),
            attendance_date: date,
            status,
        }
    }

    fn october_query(employee: &str) -> AttendanceQuery {
        AttendanceQuery {
            employee: employee.to_string(),
            period: "2025-10".parse::<FiscalMonth>().unwrap().date_range(),
        }
    }

    #[tokio::test]
    async fn test_counts_only_present_days_in_range() {
        let repo = setup_test().await;
        let d = |day: u32| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();

        let records = vec![
            record("ATT-1", "EMP-A", d(1), AttendanceStatus::Present),
            record("ATT-2", "EMP-A", d(2), AttendanceStatus::Present),
            record("ATT-3", "EMP-A", d(31), AttendanceStatus::Present),
            record("ATT-4", "EMP-A", d(3), AttendanceStatus::Absent),
            record("ATT-5", "EMP-A", d(4), AttendanceStatus::HalfDay),
            record("ATT-6", "EMP-A", d(5), AttendanceStatus::WorkFromHome),
            record("ATT-7", "EMP-A", NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(), AttendanceStatus::Present),
            record("ATT-8", "EMP-A", NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(), AttendanceStatus::Present),
            record("ATT-9", "EMP-B", d(1), AttendanceStatus::Present),
        ];
        for r in &records {
            repo.store_attendance(r).await.expect("Failed to store attendance");
        }

        assert_eq!(repo.count_present_days(&october_query("EMP-A")).await.unwrap(), 3);
        assert_eq!(repo.count_present_days(&october_query("EMP-B")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_no_records_yields_zero() {
        let repo = setup_test().await;
        assert_eq!(repo.count_present_days(&october_query("EMP-Z")).await.unwrap(), 0);
    }
}
