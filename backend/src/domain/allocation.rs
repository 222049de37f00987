//! Weighted allocation of a department's revenue pool.
//!
//! Each employee scores `present_days * 1.0 + shifts_count * 0.5`; the pool
//! is split in proportion to those scores. When nobody scores anything the
//! pool is not distributed and every share is zero.

/// Weight of one "Present" attendance day
pub const ATTENDANCE_WEIGHT: f64 = 1.0;

/// Weight of one shift assignment
pub const SHIFT_WEIGHT: f64 = 0.5;

/// Attendance and shift counts of one employee for the period
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeTally {
    pub employee: String,
    pub present_days: u32,
    pub shifts_count: u32,
}

impl EmployeeTally {
    pub fn performance_weight(&self) -> f64 {
        performance_weight(self.present_days, self.shifts_count)
    }
}

/// One employee's computed share
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub employee: String,
    pub present_days: u32,
    pub shifts_count: u32,
    pub performance_weight: f64,
    pub base_share: f64,
    pub final_share: f64,
}

pub fn performance_weight(present_days: u32, shifts_count: u32) -> f64 {
    present_days as f64 * ATTENDANCE_WEIGHT + shifts_count as f64 * SHIFT_WEIGHT
}

pub fn allocated_pool(total_revenue: f64, pool_ratio: f64) -> f64 {
    total_revenue * pool_ratio
}

/// Split `pool` across the tallies in proportion to their weights.
/// Output order follows input order.
pub fn allocate(tallies: &[EmployeeTally], pool: f64) -> Vec<Allocation> {
    let weights: Vec<f64> = tallies.iter().map(EmployeeTally::performance_weight).collect();
    let total_weight: f64 = weights.iter().sum();

    tallies
        .iter()
        .zip(weights)
        .map(|(tally, weight)| {
            let base_share = if total_weight > 0.0 {
                (weight / total_weight) * pool
            } else {
                0.0
            };
            Allocation {
                employee: tally.employee.clone(),
                present_days: tally.present_days,
                shifts_count: tally.shifts_count,
                performance_weight: weight,
                base_share,
                // No adjustments yet: the final share is the base share
                final_share: base_share,
            }
        })
        .collect()
}
