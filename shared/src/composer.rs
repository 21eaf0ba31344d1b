//! Client-side composition of a batch stock movement
//!
//! A movement is assembled line by line: the [`DraftLineBuilder`] holds the
//! line being configured, committing it moves a copy into the
//! [`MovementBasket`], and [`build_request`] turns the basket plus its
//! [`MovementHeader`] into the wire payload once the user submits.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    CatalogItem, InboundLine, InboundMovementRequest, MovementDirection, MovementRequest,
    OutboundLine, OutboundMovementRequest, Sector,
};
use crate::validation::{validate_expiry_date, validate_lot_number, validate_quantity};

/// Identity of a line inside one basket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineKey(String);

impl LineKey {
    fn new(item_id: Uuid, nonce: u64) -> Self {
        Self(format!("{}-{}", item_id, nonce))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lot data carried by inbound lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotInfo {
    pub lot_number: String,
    pub expiry_date: NaiveDate,
}

/// A validated line about to enter a basket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    pub item: CatalogItem,
    pub quantity: u32,
    pub lot: Option<LotInfo>,
}

/// A committed line of the basket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftLine {
    pub key: LineKey,
    pub item: CatalogItem,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<LotInfo>,
}

/// Ordered lines of one movement under construction
///
/// Keys are built from the item id and a per-basket counter that only ever
/// grows, so a key is never handed out twice during the basket's lifetime,
/// not even after [`MovementBasket::clear`].
#[derive(Debug, Default)]
pub struct MovementBasket {
    lines: Vec<DraftLine>,
    next_nonce: u64,
}

impl MovementBasket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and return the key assigned to it
    pub fn add_line(&mut self, line: NewLine) -> LineKey {
        let key = LineKey::new(line.item.id, self.next_nonce);
        self.next_nonce += 1;
        self.lines.push(DraftLine {
            key: key.clone(),
            item: line.item,
            quantity: line.quantity,
            lot: line.lot,
        });
        key
    }

    /// Remove the line with `key`; returns false when no such line exists
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        match self.lines.iter().position(|line| &line.key == key) {
            Some(idx) => {
                self.lines.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Fields of the line currently being configured
#[derive(Debug, Clone)]
pub struct DraftLineBuilder {
    direction: MovementDirection,
    item: Option<CatalogItem>,
    quantity: i64,
    lot_number: String,
    expiry_date: Option<NaiveDate>,
}

impl DraftLineBuilder {
    pub fn new(direction: MovementDirection) -> Self {
        Self {
            direction,
            item: None,
            quantity: 0,
            lot_number: String::new(),
            expiry_date: None,
        }
    }

    pub fn direction(&self) -> MovementDirection {
        self.direction
    }

    pub fn item(&self) -> Option<&CatalogItem> {
        self.item.as_ref()
    }

    pub fn select_item(&mut self, item: Option<CatalogItem>) {
        self.item = item;
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    pub fn set_lot_number(&mut self, lot_number: impl Into<String>) {
        self.lot_number = lot_number.into();
    }

    pub fn set_expiry_date(&mut self, expiry_date: Option<NaiveDate>) {
        self.expiry_date = expiry_date;
    }

    /// Validate the current fields and produce the line they describe
    ///
    /// Lot fields are only looked at for inbound movements.
    pub fn check(&self, today: NaiveDate) -> Result<NewLine, &'static str> {
        let item = self.item.clone().ok_or("Select an item")?;
        let quantity = validate_quantity(self.quantity)?;

        let lot = if self.direction.requires_lot() {
            validate_lot_number(&self.lot_number)?;
            let expiry_date = self.expiry_date.ok_or("Expiry date is required")?;
            validate_expiry_date(expiry_date, today)?;
            Some(LotInfo {
                lot_number: self.lot_number.trim().to_string(),
                expiry_date,
            })
        } else {
            None
        };

        Ok(NewLine { item, quantity, lot })
    }

    pub fn can_commit(&self, today: NaiveDate) -> bool {
        self.check(today).is_ok()
    }

    /// Move the configured line into `basket` and reset every field
    ///
    /// When the fields are incomplete nothing changes and the reason is
    /// returned for display as a warning.
    pub fn commit(
        &mut self,
        basket: &mut MovementBasket,
        today: NaiveDate,
    ) -> Result<LineKey, &'static str> {
        let line = self.check(today)?;
        let key = basket.add_line(line);
        self.reset();
        Ok(key)
    }

    pub fn reset(&mut self) {
        self.item = None;
        self.quantity = 0;
        self.lot_number.clear();
        self.expiry_date = None;
    }
}

/// Movement-wide fields filled in next to the basket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementHeader {
    pub direction: MovementDirection,
    pub note: String,
    /// Required for outbound movements, ignored for inbound ones
    pub destination: Option<Sector>,
}

impl MovementHeader {
    pub fn new(direction: MovementDirection) -> Self {
        Self {
            direction,
            note: String::new(),
            destination: None,
        }
    }
}

/// Check the preconditions for submitting `basket` under `header`
pub fn validate_submission(
    header: &MovementHeader,
    basket: &MovementBasket,
) -> Result<(), &'static str> {
    if basket.is_empty() {
        return Err("Add at least one item before submitting");
    }
    if header.direction.requires_sector() && header.destination.is_none() {
        return Err("Select the destination sector");
    }
    Ok(())
}

/// Build the wire payload for `basket`
///
/// Generated keys are dropped and catalog references are reduced to ids.
pub fn build_request(
    header: &MovementHeader,
    basket: &MovementBasket,
) -> Result<MovementRequest, &'static str> {
    validate_submission(header, basket)?;

    match header.direction {
        MovementDirection::Inbound => {
            let lines = basket
                .lines()
                .iter()
                .map(|line| {
                    let lot = line
                        .lot
                        .as_ref()
                        .ok_or("Lot number and expiry date are required for inbound lines")?;
                    Ok(InboundLine {
                        item_id: line.item.id,
                        quantity: line.quantity,
                        lot_number: lot.lot_number.clone(),
                        expiry_date: lot.expiry_date,
                    })
                })
                .collect::<Result<Vec<_>, &'static str>>()?;
            Ok(MovementRequest::Inbound(InboundMovementRequest {
                note: header.note.clone(),
                lines,
            }))
        }
        MovementDirection::Outbound => {
            let sector = header
                .destination
                .as_ref()
                .ok_or("Select the destination sector")?;
            Ok(MovementRequest::Outbound(OutboundMovementRequest {
                note: header.note.clone(),
                sector_id: sector.id,
                lines: basket
                    .lines()
                    .iter()
                    .map(|line| OutboundLine {
                        item_id: line.item.id,
                        quantity: line.quantity,
                    })
                    .collect(),
            }))
        }
    }
}
