// Repository modules
pub mod attendance_repository;
pub mod distribution_repository;
pub mod employee_repository;
pub mod revenue_repository;
pub mod shift_repository;

// Re-export repository types
pub use attendance_repository::AttendanceRepository;
pub use distribution_repository::DistributionRepository;
pub use employee_repository::EmployeeRepository;
pub use revenue_repository::RevenueRepository;
pub use shift_repository::ShiftRepository;
