use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::commands::distribution::DistributionListQuery;
use crate::domain::models::{Distribution, DistributionLineItem, FiscalMonth};
use crate::storage::connection::DbConnection;
use crate::storage::traits::{DistributionStorage, SystemWrite};

/// Repository for distribution records and their line items
#[derive(Clone)]
pub struct DistributionRepository {
    db: DbConnection,
}

impl DistributionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Map a parent row to a record without items
    fn map_distribution_row(row: &SqliteRow) -> Result<Distribution> {
        Ok(Distribution {
            name: row.get("name"),
            department: row.get("department"),
            fiscal_month: row.get::<String, _>("fiscal_month").parse::<FiscalMonth>()?,
            total_department_revenue: row.get("total_department_revenue"),
            allocated_pool: row.get("allocated_pool"),
            items: Vec::new(),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Load the ordered line items of a record
    async fn get_items(&self, parent: &str) -> Result<Vec<DistributionLineItem>> {
        let rows = sqlx::query(
            r#"
            SELECT idx, employee, present_days, shifts_count, performance_weight,
                   base_share, final_share, notes
            FROM revenue_distribution_items
            WHERE parent = ?
            ORDER BY idx ASC
            "#,
        )
        .bind(parent)
        .fetch_all(self.db.pool())
        .await?;

        let items = rows
            .iter()
            .map(|row| DistributionLineItem {
                idx: row.get::<i64, _>("idx") as u32,
                employee: row.get("employee"),
                present_days: row.get::<i64, _>("present_days") as u32,
                shifts_count: row.get::<i64, _>("shifts_count") as u32,
                performance_weight: row.get("performance_weight"),
                base_share: row.get("base_share"),
                final_share: row.get("final_share"),
                notes: row.get("notes"),
            })
            .collect();

        Ok(items)
    }
}

#[async_trait]
impl DistributionStorage for DistributionRepository {
    async fn find_distribution_name(&self, department: &str, fiscal_month: &FiscalMonth) -> Result<Option<String>> {
        let name: Option<String> = sqlx::query_scalar(
            r#"
            SELECT name
            FROM revenue_distributions
            WHERE department = ? AND fiscal_month = ?
            "#,
        )
        .bind(department)
        .bind(fiscal_month.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        Ok(name)
    }

    async fn get_distribution(&self, name: &str) -> Result<Option<Distribution>> {
        let row = sqlx::query(
            r#"
            SELECT name, department, fiscal_month, total_department_revenue, allocated_pool,
                   created_at, updated_at
            FROM revenue_distributions
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => {
                let mut distribution = Self::map_distribution_row(&r)?;
                distribution.items = self.get_items(&distribution.name).await?;
                Ok(Some(distribution))
            }
            None => Ok(None),
        }
    }

    async fn list_distributions(&self, query: &DistributionListQuery) -> Result<Vec<Distribution>> {
        let fiscal_month = query.fiscal_month.map(|m| m.to_string());

        let rows = sqlx::query(
            r#"
            SELECT name, department, fiscal_month, total_department_revenue, allocated_pool,
                   created_at, updated_at
            FROM revenue_distributions
            WHERE (? IS NULL OR department = ?)
              AND (? IS NULL OR fiscal_month = ?)
            ORDER BY fiscal_month DESC, department ASC
            "#,
        )
        .bind(&query.department)
        .bind(&query.department)
        .bind(&fiscal_month)
        .bind(&fiscal_month)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_distribution_row).collect()
    }

    async fn save_distribution(&self, distribution: &Distribution, _grant: SystemWrite) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO revenue_distributions
                (name, department, fiscal_month, total_department_revenue, allocated_pool, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                total_department_revenue = excluded.total_department_revenue,
                allocated_pool = excluded.allocated_pool,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&distribution.name)
        .bind(&distribution.department)
        .bind(distribution.fiscal_month.to_string())
        .bind(distribution.total_department_revenue)
        .bind(distribution.allocated_pool)
        .bind(&distribution.created_at)
        .bind(&distribution.updated_at)
        .execute(&mut *tx)
        .await?;

        // Line items are replaced wholesale so no stale rows survive a recompute
        sqlx::query("DELETE FROM revenue_distribution_items WHERE parent = ?")
            .bind(&distribution.name)
            .execute(&mut *tx)
            .await?;

        for item in &distribution.items {
            sqlx::query(
                r#"
                INSERT INTO revenue_distribution_items
                    (parent, idx, employee, present_days, shifts_count, performance_weight,
                     base_share, final_share, notes)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&distribution.name)
            .bind(item.idx as i64)
            .bind(&item.employee)
            .bind(item.present_days as i64)
            .bind(item.shifts_count as i64)
            .bind(item.performance_weight)
            .bind(item.base_share)
            .bind(item.final_share)
            .bind(&item.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
