//! Domain models for the revenue side: cost centers and the invoices posted against them.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document lifecycle of an invoice. Only submitted invoices count as revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocStatus {
    Draft,
    Submitted,
    Cancelled,
}

impl DocStatus {
    pub fn as_i64(&self) -> i64 {
        match self {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }

    #[cfg(test)]
    pub fn from_i64(value: i64) -> anyhow::Result<Self> {
        match value {
            0 => Ok(DocStatus::Draft),
            1 => Ok(DocStatus::Submitted),
            2 => Ok(DocStatus::Cancelled),
            other => Err(anyhow::anyhow!("Invalid docstatus: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    pub name: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesInvoice {
    pub name: String,
    pub cost_center: String,
    pub posting_date: NaiveDate,
    pub grand_total: f64,
    pub docstatus: DocStatus,
}
