//! Mappers for converting between distribution domain models and shared DTOs.

use crate::domain::commands::distribution::{
    BuildDistributionCommand, BuildDistributionResult, DistributionListQuery,
};
use crate::domain::models::{Distribution, DistributionLineItem, FiscalMonth, FiscalMonthError};
use shared::{
    BuildDistributionRequest, DistributionItem, DistributionListRequest, DistributionRecord,
    DistributionSummary,
};

/// Trimmed filter value, or None when the parameter is absent or blank
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct DistributionMapper;

impl DistributionMapper {
    pub fn to_command(request: BuildDistributionRequest) -> BuildDistributionCommand {
        BuildDistributionCommand {
            department: request.department,
            month: request.month,
        }
    }

    pub fn to_list_query(request: DistributionListRequest) -> Result<DistributionListQuery, FiscalMonthError> {
        let fiscal_month = non_blank(request.month)
            .map(|month| month.parse::<FiscalMonth>())
            .transpose()?;

        Ok(DistributionListQuery {
            department: non_blank(request.department),
            fiscal_month,
        })
    }

    pub fn to_summary_dto(result: BuildDistributionResult) -> DistributionSummary {
        DistributionSummary {
            name: result.name,
            total_department_revenue: result.total_department_revenue,
            allocated_pool: result.allocated_pool,
        }
    }

    pub fn to_item_dto(item: DistributionLineItem) -> DistributionItem {
        DistributionItem {
            idx: item.idx,
            employee: item.employee,
            present_days: item.present_days,
            shifts_count: item.shifts_count,
            performance_weight: item.performance_weight,
            base_share: item.base_share,
            final_share: item.final_share,
            notes: item.notes,
        }
    }

    pub fn to_record_dto(domain: Distribution) -> DistributionRecord {
        DistributionRecord {
            name: domain.name,
            department: domain.department,
            fiscal_month: domain.fiscal_month.to_string(),
            total_department_revenue: domain.total_department_revenue,
            allocated_pool: domain.allocated_pool,
            items: domain.items.into_iter().map(Self::to_item_dto).collect(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
