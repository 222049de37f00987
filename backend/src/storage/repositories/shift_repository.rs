use anyhow::Result;
use async_trait::async_trait;

use crate::domain::commands::lookups::ShiftQuery;
use crate::domain::models::ShiftAssignment;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ShiftStorage;

/// Repository for shift assignments
#[derive(Clone)]
pub struct ShiftRepository {
    db: DbConnection,
}

impl ShiftRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store or replace a shift assignment
    pub async fn store_shift_assignment(&self, assignment: &ShiftAssignment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO shift_assignments (name, employee, shift_type, start_date, end_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&assignment.name)
        .bind(&assignment.employee)
        .bind(&assignment.shift_type)
        .bind(assignment.start_date)
        .bind(assignment.end_date)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ShiftStorage for ShiftRepository {
    async fn count_shifts(&self, query: &ShiftQuery) -> Result<u32> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM shift_assignments
            WHERE employee = ?
              AND start_date BETWEEN ? AND ?
            "#,
        )
        .bind(&query.employee)
        .bind(query.period.start)
        .bind(query.period.end)
        .fetch_one(self.db.pool())
        .await?;

        Ok(u32::try_from(count)?)
    }
}
