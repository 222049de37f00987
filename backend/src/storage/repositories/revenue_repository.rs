use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::commands::lookups::RevenueQuery;
use crate::domain::models::{CostCenter, DocStatus, SalesInvoice};
use crate::storage::connection::DbConnection;
use crate::storage::traits::RevenueStorage;

/// Repository for cost centers and the sales invoices posted against them
#[derive(Clone)]
pub struct RevenueRepository {
    db: DbConnection,
}

impl RevenueRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store or replace a cost center
    pub async fn store_cost_center(&self, cost_center: &CostCenter) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO cost_centers (name, department)
            VALUES (?, ?)
            "#,
        )
        .bind(&cost_center.name)
        .bind(&cost_center.department)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Store or replace a sales invoice
    pub async fn store_sales_invoice(&self, invoice: &SalesInvoice) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO sales_invoices (name, cost_center, posting_date, grand_total, docstatus)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.name)
        .bind(&invoice.cost_center)
        .bind(invoice.posting_date)
        .bind(invoice.grand_total)
        .bind(invoice.docstatus.as_i64())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a sales invoice by name
    #[cfg(test)]
    pub async fn get_sales_invoice(&self, name: &str) -> Result<Option<SalesInvoice>> {
        let row = sqlx::query(
            r#"
            SELECT name, cost_center, posting_date, grand_total, docstatus
            FROM sales_invoices
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(SalesInvoice {
                name: r.get("name"),
                cost_center: r.get("cost_center"),
                posting_date: r.get("posting_date"),
                grand_total: r.get("grand_total"),
                docstatus: DocStatus::from_i64(r.get("docstatus"))?,
            })),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RevenueStorage for RevenueRepository {
    async fn department_revenue(&self, query: &RevenueQuery) -> Result<f64> {
        let row = sqlx::query(
            r#"
            SELECT SUM(grand_total) AS total
            FROM sales_invoices
            WHERE docstatus = ?
              AND posting_date BETWEEN ? AND ?
              AND cost_center IN (
                SELECT name FROM cost_centers WHERE department = ?
              )
            "#,
        )
        .bind(DocStatus::Submitted.as_i64())
        .bind(query.period.start)
        .bind(query.period.end)
        .bind(&query.department)
        .fetch_one(self.db.pool())
        .await?;

        let total: Option<f64> = row.get("total");
        Ok(total.unwrap_or(0.0))
    }
}
