//! Employee management

use reqwest::Method;
use shared::{validate_new_employee, EmployeeSummary, NewEmployee};
use tracing::info;

use super::{ApiClient, Query};
use crate::error::{ClientError, ClientResult};
use crate::events::Resource;

impl ApiClient {
    pub async fn list_employees(&self) -> ClientResult<Vec<EmployeeSummary>> {
        self.get_list("/funcionarios", &Query::new()).await
    }

    /// Create an employee; `confirmation` is the repeated new password
    pub async fn create_employee(
        &self,
        employee: &NewEmployee,
        confirmation: &str,
    ) -> ClientResult<()> {
        validate_new_employee(employee, confirmation)?;
        if employee.admin_password.is_empty() {
            return Err(ClientError::validation(
                "Confirm your own password to create users",
            ));
        }
        self.send_json(Method::POST, "/funcionarios", employee)
            .await?;
        info!(login = %employee.login, "Employee created");
        self.announce(&[Resource::Users]);
        Ok(())
    }
}
