use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::{Employee, EmployeeStatus};
use crate::storage::connection::DbConnection;
use crate::storage::traits::EmployeeStorage;

/// Repository for the employee directory
#[derive(Clone)]
pub struct EmployeeRepository {
    db: DbConnection,
}

impl EmployeeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store or replace an employee
    pub async fn store_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO employees (name, employee_name, department, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.employee_name)
        .bind(&employee.department)
        .bind(employee.status.as_str())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Change an employee's status. Returns false if the employee does not exist.
    pub async fn update_employee_status(&self, name: &str, status: EmployeeStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE employees SET status = ? WHERE name = ?")
            .bind(status.as_str())
            .bind(name)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get an employee by name
    #[cfg(test)]
    pub async fn get_employee(&self, name: &str) -> Result<Option<Employee>> {
        let row = sqlx::query(
            r#"
            SELECT name, employee_name, department, status
            FROM employees
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Employee {
                name: r.get("name"),
                employee_name: r.get("employee_name"),
                department: r.get("department"),
                status: r.get::<String, _>("status").parse()?,
            })),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl EmployeeStorage for EmployeeRepository {
    async fn list_active_employees(&self, department: &str) -> Result<Vec<Employee>> {
        let rows = sqlx::query(
            r#"
            SELECT name, employee_name, department, status
            FROM employees
            WHERE department = ? AND status = ?
            ORDER BY name ASC
            "#,
        )
        .bind(department)
        .bind(EmployeeStatus::Active.as_str())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> Result<Employee> {
                Ok(Employee {
                    name: row.get("name"),
                    employee_name: row.get("employee_name"),
                    department: row.get("department"),
                    status: row.get::<String, _>("status").parse()?,
                })
            })
            .collect()
    }
}
