//! Domain model for a department revenue distribution and its line items.
use super::fiscal_month::FiscalMonth;

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionLineItem {
    /// 1-based position within the parent record
    pub idx: u32,
    pub employee: String,
    pub present_days: u32,
    pub shifts_count: u32,
    pub performance_weight: f64,
    pub base_share: f64,
    pub final_share: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub name: String,
    pub department: String,
    pub fiscal_month: FiscalMonth,
    pub total_department_revenue: f64,
    pub allocated_pool: f64,
    pub items: Vec<DistributionLineItem>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

impl Distribution {
    /// Generate the record name for a department and month
    pub fn generate_name(department: &str, fiscal_month: &FiscalMonth) -> String {
        format!("distribution::{}::{}", department, fiscal_month)
    }

    /// Construct an empty, not yet persisted record keyed by department and month
    pub fn new(department: &str, fiscal_month: FiscalMonth, timestamp_rfc3339: String) -> Self {
        Self {
            name: Self::generate_name(department, &fiscal_month),
            department: department.to_string(),
            fiscal_month,
            total_department_revenue: 0.0,
            allocated_pool: 0.0,
            items: Vec::new(),
            created_at: timestamp_rfc3339.clone(),
            updated_at: timestamp_rfc3339,
        }
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    /// Append a line item, assigning it the next position
    pub fn append_item(
        &mut self,
        employee: String,
        present_days: u32,
        shifts_count: u32,
        performance_weight: f64,
        base_share: f64,
        final_share: f64,
    ) {
        let idx = self.items.len() as u32 + 1;
        self.items.push(DistributionLineItem {
            idx,
            employee,
            present_days,
            shifts_count,
            performance_weight,
            base_share,
            final_share,
            notes: String::new(),
        });
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|item| item.performance_weight).sum()
    }

    pub fn total_final_share(&self) -> f64 {
        self.items.iter().map(|item| item.final_share).sum()
    }
}
