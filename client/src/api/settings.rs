//! Alert threshold settings

use reqwest::Method;
use shared::{validate_alert_settings, AlertSettings};

use super::{ApiClient, Query};
use crate::error::ClientResult;
use crate::events::Resource;

impl ApiClient {
    pub async fn alert_settings(&self) -> ClientResult<AlertSettings> {
        self.get_json("/configuracoes", &Query::new()).await
    }

    pub async fn save_alert_settings(&self, settings: &AlertSettings) -> ClientResult<()> {
        validate_alert_settings(settings)?;
        self.send_json(Method::PUT, "/configuracoes", settings)
            .await?;
        self.announce(&[Resource::Settings]);
        Ok(())
    }
}
