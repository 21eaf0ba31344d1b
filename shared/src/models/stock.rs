//! Stock balances and lots

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ItemKind;

/// Total quantity on hand for one item, across all lots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBalance {
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    #[serde(rename = "nomeItem")]
    pub item_name: String,
    #[serde(rename = "dtype")]
    pub kind: ItemKind,
    #[serde(rename = "quantidadeTotal")]
    pub total_quantity: i64,
}

/// One lot of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotEntry {
    pub id: Uuid,
    #[serde(rename = "numeroLote")]
    pub lot_number: String,
    #[serde(rename = "dataValidade")]
    pub expiry_date: NaiveDate,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    #[serde(rename = "nomeItem")]
    pub item_name: String,
    #[serde(rename = "tipoItem", default)]
    pub item_type: String,
}

impl LotEntry {
    /// Days until expiry relative to `today`; negative once expired
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date <= today
    }
}

/// Manual correction of a lot's quantity and expiry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotAdjustment {
    #[serde(rename = "novaQuantidade")]
    pub new_quantity: i64,
    #[serde(rename = "novaDataValidade")]
    pub new_expiry_date: NaiveDate,
    #[serde(rename = "observacao")]
    pub note: String,
}

impl LotAdjustment {
    /// Start an adjustment from the lot's current values; the note starts empty
    pub fn from_lot(lot: &LotEntry) -> Self {
        Self {
            new_quantity: lot.quantity,
            new_expiry_date: lot.expiry_date,
            note: String::new(),
        }
    }
}
