//! Stock movement models: history records and batch submission payloads

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a movement as composed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    /// Adds lot quantity to stock
    Inbound,
    /// Deducts quantity, attributed to a destination sector
    Outbound,
}

impl MovementDirection {
    /// Backend endpoint accepting a batch in this direction
    pub fn endpoint(&self) -> &'static str {
        match self {
            MovementDirection::Inbound => "/movimentacoes/entrada",
            MovementDirection::Outbound => "/movimentacoes/saida",
        }
    }

    pub fn requires_lot(&self) -> bool {
        matches!(self, MovementDirection::Inbound)
    }

    pub fn requires_sector(&self) -> bool {
        matches!(self, MovementDirection::Outbound)
    }
}

impl std::fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementDirection::Inbound => write!(f, "Inbound"),
            MovementDirection::Outbound => write!(f, "Outbound"),
        }
    }
}

/// Recorded movement category, discriminated by `tipoMovimentacao`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "ENTRADA")]
    Inbound,
    #[serde(rename = "SAIDA")]
    Outbound,
    #[serde(rename = "AJUSTE_ENTRADA")]
    AdjustmentIn,
    #[serde(rename = "AJUSTE_SAIDA")]
    AdjustmentOut,
}

impl MovementKind {
    pub fn direction(&self) -> MovementDirection {
        match self {
            MovementKind::Inbound | MovementKind::AdjustmentIn => MovementDirection::Inbound,
            MovementKind::Outbound | MovementKind::AdjustmentOut => MovementDirection::Outbound,
        }
    }

    pub fn is_adjustment(&self) -> bool {
        matches!(self, MovementKind::AdjustmentIn | MovementKind::AdjustmentOut)
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementKind::Inbound => write!(f, "Inbound"),
            MovementKind::Outbound => write!(f, "Outbound"),
            MovementKind::AdjustmentIn => write!(f, "Adjustment (in)"),
            MovementKind::AdjustmentOut => write!(f, "Adjustment (out)"),
        }
    }
}

/// Summary row of the movement history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementSummary {
    pub id: Uuid,
    #[serde(rename = "tipoMovimentacao")]
    pub kind: MovementKind,
    #[serde(rename = "totalItens", default)]
    pub total_items: i64,
    #[serde(rename = "quantidadeTotal", default)]
    pub total_quantity: i64,
    #[serde(rename = "nomeSetor", default, skip_serializing_if = "Option::is_none")]
    pub sector_name: Option<String>,
    #[serde(rename = "observacao", default)]
    pub note: Option<String>,
    #[serde(rename = "dataMovimentacao")]
    pub moved_at: NaiveDateTime,
    #[serde(rename = "nomeFuncionario", default)]
    pub employee_name: String,
}

/// Full movement with every item it touched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementDetails {
    pub id: Uuid,
    #[serde(rename = "tipoMovimentacao")]
    pub kind: MovementKind,
    #[serde(rename = "dataMovimentacao")]
    pub moved_at: NaiveDateTime,
    #[serde(rename = "observacao", default)]
    pub note: Option<String>,
    #[serde(rename = "nomeFuncionario", default)]
    pub employee_name: String,
    #[serde(rename = "nomeSetor", default, skip_serializing_if = "Option::is_none")]
    pub sector_name: Option<String>,
    #[serde(rename = "itens", default)]
    pub items: Vec<MovedItem>,
}

impl MovementDetails {
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// One item line inside a recorded movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedItem {
    #[serde(rename = "nomeItem")]
    pub item_name: String,
    #[serde(rename = "tipoItem", default)]
    pub item_type: String,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
}

/// Line of an inbound batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundLine {
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "numeroLote")]
    pub lot_number: String,
    #[serde(rename = "dataValidade")]
    pub expiry_date: NaiveDate,
}

/// Line of an outbound batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundLine {
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

/// Body of `POST /movimentacoes/entrada`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMovementRequest {
    #[serde(rename = "observacao")]
    pub note: String,
    #[serde(rename = "itens")]
    pub lines: Vec<InboundLine>,
}

/// Body of `POST /movimentacoes/saida`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMovementRequest {
    #[serde(rename = "observacao")]
    pub note: String,
    #[serde(rename = "setorId")]
    pub sector_id: Uuid,
    #[serde(rename = "itens")]
    pub lines: Vec<OutboundLine>,
}

/// A complete batch movement, ready to be posted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MovementRequest {
    Inbound(InboundMovementRequest),
    Outbound(OutboundMovementRequest),
}

impl MovementRequest {
    pub fn direction(&self) -> MovementDirection {
        match self {
            MovementRequest::Inbound(_) => MovementDirection::Inbound,
            MovementRequest::Outbound(_) => MovementDirection::Outbound,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.direction().endpoint()
    }

    pub fn line_count(&self) -> usize {
        match self {
            MovementRequest::Inbound(req) => req.lines.len(),
            MovementRequest::Outbound(req) => req.lines.len(),
        }
    }

    pub fn total_quantity(&self) -> u64 {
        match self {
            MovementRequest::Inbound(req) => req.lines.iter().map(|l| u64::from(l.quantity)).sum(),
            MovementRequest::Outbound(req) => req.lines.iter().map(|l| u64::from(l.quantity)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_directions() {
        assert_eq!(MovementKind::Inbound.direction(), MovementDirection::Inbound);
        assert_eq!(MovementKind::AdjustmentIn.direction(), MovementDirection::Inbound);
        assert_eq!(MovementKind::Outbound.direction(), MovementDirection::Outbound);
        assert_eq!(MovementKind::AdjustmentOut.direction(), MovementDirection::Outbound);
        assert!(MovementKind::AdjustmentOut.is_adjustment());
        assert!(!MovementKind::Outbound.is_adjustment());
    }

    #[test]
    fn test_history_row_deserializes() {
        let json = r#"{
            "id": "0b7f8e0c-7a57-4a53-8a9e-5f5b3c1a2d10",
            "tipoMovimentacao": "AJUSTE_SAIDA",
            "totalItens": 1,
            "quantidadeTotal": 4,
            "observacao": "Quebra",
            "dataMovimentacao": "2026-10-01T14:30:00",
            "nomeFuncionario": "Ana"
        }"#;
        let row: MovementSummary = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind, MovementKind::AdjustmentOut);
        assert_eq!(row.sector_name, None);
        assert_eq!(row.total_quantity, 4);
    }

    #[test]
    fn test_outbound_request_shape() {
        let sector = Uuid::new_v4();
        let item = Uuid::new_v4();
        let request = MovementRequest::Outbound(OutboundMovementRequest {
            note: "Plantão".into(),
            sector_id: sector,
            lines: vec![OutboundLine {
                item_id: item,
                quantity: 3,
            }],
        });
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["setorId"], sector.to_string());
        assert_eq!(value["itens"][0]["quantidade"], 3);
        assert!(value["itens"][0].get("numeroLote").is_none());
        assert_eq!(request.endpoint(), "/movimentacoes/saida");
    }
}
