//! Domain model for an employee as seen by the employee directory.
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Suspended,
    Left,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
            EmployeeStatus::Suspended => "Suspended",
            EmployeeStatus::Left => "Left",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(EmployeeStatus::Active),
            "Inactive" => Ok(EmployeeStatus::Inactive),
            "Suspended" => Ok(EmployeeStatus::Suspended),
            "Left" => Ok(EmployeeStatus::Left),
            other => Err(anyhow::anyhow!("Unknown employee status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier, e.g. "HR-EMP-00012"
    pub name: String,
    pub employee_name: String,
    pub department: String,
    pub status: EmployeeStatus,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}
