//! Stock balances and lot corrections

use reqwest::Method;
use shared::{validate_lot_adjustment, LotAdjustment, LotEntry, Page, StockBalance};
use uuid::Uuid;

use super::{ApiClient, Query};
use crate::error::ClientResult;
use crate::events::Resource;
use crate::grid::GridQuery;

impl ApiClient {
    /// One page of per-item stock totals
    pub async fn stock_balances(&self, query: &GridQuery) -> ClientResult<Page<StockBalance>> {
        self.get_json("/estoque", &query.to_params()).await
    }

    /// Every lot of one item
    pub async fn lots_for_item(&self, item_id: Uuid) -> ClientResult<Vec<LotEntry>> {
        self.get_list(&format!("/estoque/item/{}", item_id), &Query::new())
            .await
    }

    /// Overwrite a lot's quantity and expiry; the backend records an
    /// adjustment movement for the difference
    pub async fn adjust_lot(&self, lot_id: Uuid, adjustment: &LotAdjustment) -> ClientResult<()> {
        validate_lot_adjustment(adjustment)?;
        self.send_json(Method::PUT, &format!("/estoque/ajustar/{}", lot_id), adjustment)
            .await?;
        self.announce(&[Resource::Stock, Resource::Movements]);
        Ok(())
    }
}
