use shared::{CatalogItem, MovementDirection, Sector};
use tracing::debug;
use uuid::Uuid;

use crate::api::CatalogSource;
use crate::error::ClientResult;

/// Items and sectors offered by one movement dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
    pub sectors: Vec<Sector>,
}

impl Catalog {
    pub fn find_item(&self, id: Uuid) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_sector(&self, id: Uuid) -> Option<&Sector> {
        self.sectors.iter().find(|sector| sector.id == id)
    }
}

/// Load what a dialog for `direction` needs
///
/// Outbound movements only offer items with stock on hand and need the
/// sector list; inbound movements offer every item.
pub async fn fetch_catalog<S: CatalogSource + ?Sized>(
    source: &S,
    direction: MovementDirection,
) -> ClientResult<Catalog> {
    let catalog = match direction {
        MovementDirection::Outbound => {
            let (items, sectors) =
                tokio::try_join!(source.catalog_items(true), source.catalog_sectors())?;
            Catalog { items, sectors }
        }
        MovementDirection::Inbound => Catalog {
            items: source.catalog_items(false).await?,
            sectors: Vec::new(),
        },
    };

    debug!(
        %direction,
        items = catalog.items.len(),
        sectors = catalog.sectors.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}
