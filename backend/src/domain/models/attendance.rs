//! Domain models for attendance and shift assignment records.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    OnLeave,
    HalfDay,
    WorkFromHome,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::OnLeave => "On Leave",
            AttendanceStatus::HalfDay => "Half Day",
            AttendanceStatus::WorkFromHome => "Work From Home",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub name: String,
    pub employee: String,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub name: String,
    pub employee: String,
    pub shift_type: String,
    pub start_date: NaiveDate,
    /// Open-ended assignments have no end date
    pub end_date: Option<NaiveDate>,
}
