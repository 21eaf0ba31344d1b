//! Items and sectors

use reqwest::Method;
use shared::{
    validate_item_input, validate_sector_input, CatalogItem, Item, ItemInput, ItemKind, Page,
    Sector, SectorInput,
};
use uuid::Uuid;

use super::{ApiClient, Query};
use crate::error::ClientResult;
use crate::events::Resource;
use crate::grid::GridQuery;

impl ApiClient {
    /// One page of the item catalog, filtered by category and search term
    pub async fn list_items(&self, query: &GridQuery) -> ClientResult<Page<Item>> {
        self.get_json("/itens", &query.to_params()).await
    }

    /// Every item, for selection lists
    pub async fn all_items(&self) -> ClientResult<Vec<CatalogItem>> {
        self.get_list("/itens", &Query::new()).await
    }

    /// Items that currently have stock on hand
    pub async fn items_with_stock(&self) -> ClientResult<Vec<CatalogItem>> {
        self.get_list("/itens/com-estoque", &Query::new()).await
    }

    /// Create an item, or update it when `id` is given
    pub async fn save_item(
        &self,
        kind: ItemKind,
        id: Option<Uuid>,
        input: &ItemInput,
    ) -> ClientResult<()> {
        validate_item_input(input, kind)?;
        match id {
            Some(id) => {
                let path = format!("{}/{}", kind.endpoint(), id);
                self.send_json(Method::PUT, &path, input).await?;
            }
            None => {
                self.send_json(Method::POST, kind.endpoint(), input).await?;
            }
        }
        self.announce(&[Resource::Items]);
        Ok(())
    }

    pub async fn delete_item(&self, kind: ItemKind, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("{}/{}", kind.endpoint(), id)).await?;
        self.announce(&[Resource::Items, Resource::Stock]);
        Ok(())
    }

    pub async fn list_sectors(&self) -> ClientResult<Vec<Sector>> {
        self.get_list("/setores", &Query::new()).await
    }

    pub async fn create_sector(&self, input: &SectorInput) -> ClientResult<()> {
        validate_sector_input(input)?;
        self.send_json(Method::POST, "/setores", input).await?;
        self.announce(&[Resource::Sectors]);
        Ok(())
    }

    pub async fn update_sector(&self, id: Uuid, input: &SectorInput) -> ClientResult<()> {
        validate_sector_input(input)?;
        self.send_json(Method::PUT, &format!("/setores/{}", id), input)
            .await?;
        self.announce(&[Resource::Sectors]);
        Ok(())
    }

    pub async fn delete_sector(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("/setores/{}", id)).await?;
        self.announce(&[Resource::Sectors]);
        Ok(())
    }
}
