use std::sync::Arc;

use shared::{build_request, MovementBasket, MovementHeader, MovementRequest};
use tracing::{info, warn};

use crate::api::MovementBackend;
use crate::error::{ClientError, ClientResult};

/// Validates a composed movement and posts it as a single batch
#[derive(Clone)]
pub struct MovementSubmitter {
    backend: Arc<dyn MovementBackend>,
}

impl MovementSubmitter {
    pub fn new(backend: Arc<dyn MovementBackend>) -> Self {
        Self { backend }
    }

    /// Check the preconditions and build the payload; no request is made
    pub fn prepare(
        &self,
        header: &MovementHeader,
        basket: &MovementBasket,
    ) -> ClientResult<MovementRequest> {
        build_request(header, basket).map_err(|reason| {
            warn!(direction = %header.direction, reason, "Movement rejected before submission");
            ClientError::validation(reason)
        })
    }

    /// Post a prepared payload
    pub async fn send(&self, request: &MovementRequest) -> ClientResult<()> {
        info!(
            direction = %request.direction(),
            lines = request.line_count(),
            "Submitting movement"
        );
        self.backend.submit_movement(request).await
    }

    /// [`Self::prepare`] followed by [`Self::send`]
    pub async fn submit(
        &self,
        header: &MovementHeader,
        basket: &MovementBasket,
    ) -> ClientResult<MovementRequest> {
        let request = self.prepare(header, basket)?;
        self.send(&request).await?;
        Ok(request)
    }
}
