//! Movement history and batch submission

use reqwest::Method;
use shared::{MovementDetails, MovementRequest, MovementSummary};
use tracing::info;
use uuid::Uuid;

use super::{ApiClient, Query};
use crate::error::ClientResult;
use crate::events::Resource;

impl ApiClient {
    pub async fn movement_history(&self) -> ClientResult<Vec<MovementSummary>> {
        self.get_list("/movimentacoes", &Query::new()).await
    }

    pub async fn movement_details(&self, id: Uuid) -> ClientResult<MovementDetails> {
        self.get_json(&format!("/movimentacoes/{}", id), &Query::new())
            .await
    }

    /// Post a batch to the endpoint matching its direction
    pub async fn post_movement(&self, request: &MovementRequest) -> ClientResult<()> {
        self.send_json(Method::POST, request.endpoint(), request)
            .await?;
        info!(
            direction = %request.direction(),
            lines = request.line_count(),
            quantity = request.total_quantity(),
            "Movement registered"
        );
        self.announce(&[Resource::Stock, Resource::Movements]);
        Ok(())
    }
}
