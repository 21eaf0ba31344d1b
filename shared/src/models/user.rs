//! Users, profiles and credentials

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Minimum password length accepted by the user forms
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Login request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub login: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// The authenticated user's own profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "nome")]
    pub name: String,
    pub login: String,
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ProfileUpdate {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,
}

/// Password change request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    #[serde(rename = "senhaAtual")]
    pub current_password: String,
    #[serde(rename = "novaSenha")]
    pub new_password: String,
}

/// Row of the employee management list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub login: String,
    #[serde(rename = "ativo", default)]
    pub active: bool,
}

/// New employee; the backend re-checks the acting admin's password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewEmployee {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,
    #[serde(rename = "senha")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(rename = "senhaAdminConfirmacao")]
    pub admin_password: String,
}
