use serde::{Deserialize, Serialize};

/// Request to (re)build the revenue distribution of one department for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildDistributionRequest {
    /// Department identifier, e.g. "Cardiology"
    pub department: String,
    /// Fiscal month formatted as "YYYY-MM"
    pub month: String,
}

/// Summary returned after a distribution has been built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Record identifier: "distribution::<department>::<YYYY-MM>"
    pub name: String,
    pub total_department_revenue: f64,
    pub allocated_pool: f64,
}

/// One employee's share within a distribution record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionItem {
    /// 1-based position of the item within its record
    pub idx: u32,
    pub employee: String,
    pub present_days: u32,
    pub shifts_count: u32,
    pub performance_weight: f64,
    pub base_share: f64,
    pub final_share: f64,
    pub notes: String,
}

/// A full distribution record with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub name: String,
    pub department: String,
    pub fiscal_month: String,
    pub total_department_revenue: f64,
    pub allocated_pool: f64,
    pub items: Vec<DistributionItem>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

impl DistributionRecord {
    /// Sum of every item's final share
    pub fn total_final_share(&self) -> f64 {
        self.items.iter().map(|item| item.final_share).sum()
    }
}

/// Filters for listing distribution records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionListRequest {
    pub department: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionListResponse {
    pub distributions: Vec<DistributionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
