//! Login and the signed-in user's profile

use reqwest::Method;
use shared::{
    validate_password, validate_profile_update, Credentials, PasswordChange, ProfileUpdate,
    UserProfile,
};
use tracing::info;

use super::{ApiClient, Query};
use crate::error::{ClientError, ClientResult};

impl ApiClient {
    /// Exchange credentials for a token and store it in the session
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
        if credentials.login.trim().is_empty() || credentials.password.is_empty() {
            return Err(ClientError::validation("Login and password are required"));
        }

        let response = self
            .send_json(Method::POST, "/auth/login", credentials)
            .await?;
        let body = response.text().await?;
        let token = parse_token(&body)
            .ok_or_else(|| ClientError::validation("Login response did not contain a token"))?;

        self.session().set_token(token.clone());
        info!(login = %credentials.login, "Signed in");
        Ok(token)
    }

    /// Forget the current token
    pub fn logout(&self) {
        self.session().clear();
    }

    pub async fn me(&self) -> ClientResult<UserProfile> {
        self.get_json("/auth/me", &Query::new()).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<()> {
        validate_profile_update(update)?;
        self.send_json(Method::PUT, "/usuarios/perfil", update)
            .await?;
        Ok(())
    }

    pub async fn change_password(
        &self,
        change: &PasswordChange,
        confirmation: &str,
    ) -> ClientResult<()> {
        if change.new_password != confirmation {
            return Err(ClientError::validation(
                "The new password and its confirmation do not match",
            ));
        }
        validate_password(&change.new_password)?;
        self.send_json(Method::PUT, "/usuarios/perfil/alterar-senha", change)
            .await?;
        Ok(())
    }
}

/// The login endpoint answers with the bare token, sometimes JSON-quoted
fn parse_token(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let token = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(token)) => token,
        Ok(serde_json::Value::Object(map)) => map.get("token")?.as_str()?.to_string(),
        _ => trimmed.to_string(),
    };
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_variants() {
        assert_eq!(parse_token("eyJhbGciOi.x.y"), Some("eyJhbGciOi.x.y".into()));
        assert_eq!(parse_token("\"eyJ.a.b\"\n"), Some("eyJ.a.b".into()));
        assert_eq!(parse_token(r#"{"token": "eyJ.c.d"}"#), Some("eyJ.c.d".into()));
        assert_eq!(parse_token("  "), None);
        assert_eq!(parse_token(r#"{"user": "x"}"#), None);
    }
}
