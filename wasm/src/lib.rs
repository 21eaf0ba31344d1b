//! WebAssembly module for the Pharmacy Stock front-end
//!
//! Provides client-side computation for:
//! - Composing batch movements (draft line, basket, payload)
//! - Form validation before anything is sent
//! - Small display helpers shared with the native client

use shared::composer::{
    build_request, validate_submission, DraftLineBuilder, LineKey, MovementBasket, MovementHeader,
};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Builder, basket and header of one "register movement" dialog
#[wasm_bindgen]
pub struct MovementComposer {
    builder: DraftLineBuilder,
    basket: MovementBasket,
    header: MovementHeader,
}

#[wasm_bindgen]
impl MovementComposer {
    /// Start an empty composer; `inbound` selects the direction
    #[wasm_bindgen(constructor)]
    pub fn new(inbound: bool) -> MovementComposer {
        let direction = if inbound {
            MovementDirection::Inbound
        } else {
            MovementDirection::Outbound
        };
        MovementComposer {
            builder: DraftLineBuilder::new(direction),
            basket: MovementBasket::new(),
            header: MovementHeader::new(direction),
        }
    }

    pub fn is_inbound(&self) -> bool {
        self.header.direction == MovementDirection::Inbound
    }

    /// Backend path the payload is posted to
    pub fn endpoint(&self) -> String {
        self.header.direction.endpoint().to_string()
    }

    /// Select the builder's item; an unparsable id clears the selection
    pub fn select_item(&mut self, id: &str, name: &str) -> bool {
        let item = Uuid::parse_str(id).ok().map(|id| CatalogItem::new(id, name));
        let selected = item.is_some();
        self.builder.select_item(item);
        selected
    }

    pub fn clear_item(&mut self) {
        self.builder.select_item(None);
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.builder.set_quantity(i64::from(quantity));
    }

    pub fn set_lot_number(&mut self, lot_number: &str) {
        self.builder.set_lot_number(lot_number);
    }

    /// Set the expiry as `YYYY-MM-DD`; blank or invalid input clears it
    pub fn set_expiry_date(&mut self, expiry_date: &str) -> bool {
        let parsed = parse_date(expiry_date);
        self.builder.set_expiry_date(parsed);
        parsed.is_some()
    }

    pub fn can_commit(&self, today: &str) -> bool {
        self.commit_blocker(today).is_none()
    }

    /// Why the current line cannot be added, if it cannot
    pub fn commit_blocker(&self, today: &str) -> Option<String> {
        let today = match parse_date(today) {
            Some(date) => date,
            None => return Some("Invalid date".to_string()),
        };
        self.builder.check(today).err().map(str::to_string)
    }

    /// Add the current line and return its key
    pub fn commit(&mut self, today: &str) -> Result<String, JsValue> {
        let today = parse_date(today).ok_or_else(|| JsValue::from_str("Invalid date"))?;
        self.builder
            .commit(&mut self.basket, today)
            .map(|key| key.to_string())
            .map_err(JsValue::from_str)
    }

    pub fn remove_line(&mut self, key: &str) -> bool {
        self.basket.remove_line(&LineKey::from(key))
    }

    pub fn line_count(&self) -> usize {
        self.basket.len()
    }

    pub fn total_quantity(&self) -> f64 {
        self.basket.total_quantity() as f64
    }

    /// Basket lines as JSON, for rendering the table
    pub fn lines_json(&self) -> String {
        serde_json::to_string(self.basket.lines()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn set_note(&mut self, note: &str) {
        self.header.note = note.to_string();
    }

    /// Choose the destination sector; ignored for inbound movements
    pub fn set_sector(&mut self, id: &str, name: &str) -> bool {
        if !self.header.direction.requires_sector() {
            return false;
        }
        self.header.destination = Uuid::parse_str(id).ok().map(|id| Sector::new(id, name));
        self.header.destination.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocker().is_none()
    }

    pub fn submit_blocker(&self) -> Option<String> {
        validate_submission(&self.header, &self.basket)
            .err()
            .map(str::to_string)
    }

    /// Request body for the movement endpoint
    pub fn payload_json(&self) -> Result<String, JsValue> {
        let request = build_request(&self.header, &self.basket).map_err(JsValue::from_str)?;
        serde_json::to_string(&request)
            .map_err(|e| JsValue::from_str(&format!("Invalid payload: {}", e)))
    }

    /// Forget every line and field, e.g. after a successful submission
    pub fn reset(&mut self) {
        self.builder.reset();
        self.basket.clear();
        self.header = MovementHeader::new(self.header.direction);
    }
}

/// Check a line quantity
#[wasm_bindgen]
pub fn is_valid_quantity(quantity: i32) -> bool {
    validate_quantity(i64::from(quantity)).is_ok()
}

/// Check that an incoming lot expires after `today` (both `YYYY-MM-DD`)
#[wasm_bindgen]
pub fn is_valid_expiry(expiry_date: &str, today: &str) -> bool {
    match (parse_date(expiry_date), parse_date(today)) {
        (Some(expiry), Some(today)) => validate_expiry_date(expiry, today).is_ok(),
        _ => false,
    }
}

/// Days left until a lot expires; negative once expired
#[wasm_bindgen]
pub fn days_until_expiry(expiry_date: &str, today: &str) -> Option<i32> {
    let days = (parse_date(expiry_date)? - parse_date(today)?).num_days();
    i32::try_from(days).ok()
}

/// File name the daily outflow report is saved under
#[wasm_bindgen]
pub fn daily_report_file_name(date: &str) -> Option<String> {
    parse_date(date).map(|d| format!("relatorio_saidas_{}.pdf", d.format(DATE_FORMAT)))
}

/// Pages needed for a grid with `total` rows
#[wasm_bindgen]
pub fn page_count(total: f64, page_size: u32) -> u32 {
    if total <= 0.0 || page_size == 0 {
        return 0;
    }
    let page = Page::<()> {
        content: Vec::new(),
        total_elements: total as u64,
    };
    u32::try_from(page.page_count(page_size)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: &str = "2026-10-18";
    const ITEM: &str = "0b7d3c9a-1f00-4c2e-9a41-1c5e7a000001";
    const SECTOR: &str = "0b7d3c9a-1f00-4c2e-9a41-1c5e7a0000aa";

    #[test]
    fn test_inbound_composer_payload() {
        let mut composer = MovementComposer::new(true);
        assert!(composer.select_item(ITEM, "Paracetamol"));
        composer.set_quantity(10);
        composer.set_lot_number("L1");
        assert!(composer.set_expiry_date("2026-10-19"));
        assert!(composer.can_commit(TODAY));

        let key = composer.commit(TODAY).unwrap();
        assert!(key.starts_with(ITEM));
        assert_eq!(composer.line_count(), 1);
        assert!(composer.can_submit());

        let payload: serde_json::Value =
            serde_json::from_str(&composer.payload_json().unwrap()).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "observacao": "",
                "itens": [{
                    "itemId": ITEM,
                    "quantidade": 10,
                    "numeroLote": "L1",
                    "dataValidade": "2026-10-19"
                }]
            })
        );
        assert_eq!(composer.endpoint(), "/movimentacoes/entrada");
    }

    #[test]
    fn test_commit_blockers() {
        let mut composer = MovementComposer::new(true);
        assert_eq!(composer.commit_blocker(TODAY).as_deref(), Some("Select an item"));

        composer.select_item(ITEM, "Paracetamol");
        composer.set_quantity(0);
        assert_eq!(
            composer.commit_blocker(TODAY).as_deref(),
            Some("Quantity must be greater than zero")
        );

        composer.set_quantity(2);
        composer.set_lot_number("L9");
        composer.set_expiry_date(TODAY);
        assert_eq!(
            composer.commit_blocker(TODAY).as_deref(),
            Some("Expiry date must be after today")
        );
        assert_eq!(composer.line_count(), 0);
    }

    #[test]
    fn test_outbound_needs_sector() {
        let mut composer = MovementComposer::new(false);
        composer.select_item(ITEM, "Paracetamol");
        composer.set_quantity(3);
        composer.commit(TODAY).unwrap();

        assert_eq!(
            composer.submit_blocker().as_deref(),
            Some("Select the destination sector")
        );
        assert!(composer.set_sector(SECTOR, "UTI"));
        assert!(composer.can_submit());
        assert_eq!(composer.endpoint(), "/movimentacoes/saida");
    }

    #[test]
    fn test_remove_and_reset() {
        let mut composer = MovementComposer::new(false);
        composer.select_item(ITEM, "Paracetamol");
        composer.set_quantity(1);
        let first = composer.commit(TODAY).unwrap();
        composer.select_item(ITEM, "Paracetamol");
        composer.set_quantity(4);
        composer.commit(TODAY).unwrap();

        assert!(!composer.remove_line("missing"));
        assert!(composer.remove_line(&first));
        assert_eq!(composer.total_quantity(), 4.0);

        composer.reset();
        assert_eq!(composer.line_count(), 0);
        assert_eq!(composer.lines_json(), "[]");
    }

    #[test]
    fn test_inbound_ignores_sector() {
        let mut composer = MovementComposer::new(true);
        assert!(!composer.set_sector(SECTOR, "UTI"));
    }

    #[test]
    fn test_helpers() {
        assert!(is_valid_quantity(1));
        assert!(!is_valid_quantity(0));
        assert!(is_valid_expiry("2026-10-19", TODAY));
        assert!(!is_valid_expiry(TODAY, TODAY));
        assert!(!is_valid_expiry("19/10/2026", TODAY));
        assert_eq!(days_until_expiry("2026-10-28", TODAY), Some(10));
        assert_eq!(
            daily_report_file_name("2026-10-17").as_deref(),
            Some("relatorio_saidas_2026-10-17.pdf")
        );
        assert_eq!(page_count(21.0, 10), 3);
        assert_eq!(page_count(0.0, 10), 0);
    }
}
