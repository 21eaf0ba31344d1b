use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    validate_submission, DraftLine, DraftLineBuilder, LineKey, MovementBasket, MovementDirection,
    MovementHeader, MovementRequest,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::catalog::{fetch_catalog, Catalog};
use super::submitter::MovementSubmitter;
use crate::api::CatalogSource;
use crate::error::{ClientError, ClientResult};
use crate::notify::Notifier;

const SUBMIT_SUCCESS: &str = "Movement registered successfully.";
const SUBMIT_FAILURE: &str = "Failed to register the movement.";
const CATALOG_FAILURE: &str = "Failed to load items or sectors.";

/// Lifecycle of a movement dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open,
    Submitting,
}

/// A submission in flight, tied to the dialog session that started it
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    generation: u64,
    request: MovementRequest,
}

impl PendingSubmission {
    pub fn request(&self) -> &MovementRequest {
        &self.request
    }
}

/// What happened when a submission result was applied to the dialog
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Accepted by the backend; the dialog is closed
    Completed,
    /// Rejected; the dialog is open again with the basket intact
    Failed(ClientError),
    /// The dialog was closed or reopened meanwhile; the result was dropped
    Ignored,
}

/// One "register movement" dialog: builder, basket and header
///
/// Each dialog owns its basket. Closing it, manually or after a successful
/// submission, discards everything composed so far.
pub struct MovementDialog {
    direction: MovementDirection,
    state: DialogState,
    generation: u64,
    builder: DraftLineBuilder,
    basket: MovementBasket,
    header: MovementHeader,
    catalog: Catalog,
    error: Option<String>,
    notifier: Arc<dyn Notifier>,
}

impl MovementDialog {
    pub fn new(direction: MovementDirection, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            direction,
            state: DialogState::Closed,
            generation: 0,
            builder: DraftLineBuilder::new(direction),
            basket: MovementBasket::new(),
            header: MovementHeader::new(direction),
            catalog: Catalog::default(),
            error: None,
            notifier,
        }
    }

    pub fn direction(&self) -> MovementDirection {
        self.direction
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    /// Inline error shown at the top of the dialog
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn header(&self) -> &MovementHeader {
        &self.header
    }

    pub fn builder(&self) -> &DraftLineBuilder {
        &self.builder
    }

    pub fn lines(&self) -> &[DraftLine] {
        self.basket.lines()
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.generation += 1;
        self.reset();
        self.state = DialogState::Open;
        debug!(direction = %self.direction, generation = self.generation, "Movement dialog opened");
    }

    /// Fetch the selectable items and sectors
    pub async fn load_catalog<S: CatalogSource + ?Sized>(&mut self, source: &S) -> ClientResult<()> {
        match fetch_catalog(source, self.direction).await {
            Ok(catalog) => {
                self.catalog = catalog;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Could not load movement catalog");
                self.error = Some(CATALOG_FAILURE.to_string());
                self.notifier.error(CATALOG_FAILURE);
                Err(e)
            }
        }
    }

    /// Close and discard the basket
    ///
    /// A submission still in flight is not cancelled; its result is ignored.
    pub fn close(&mut self) {
        if self.state == DialogState::Submitting {
            debug!(generation = self.generation, "Dialog closed with a submission in flight");
        }
        self.reset();
        self.state = DialogState::Closed;
    }

    fn reset(&mut self) {
        self.builder.reset();
        self.basket.clear();
        self.header = MovementHeader::new(self.direction);
        self.error = None;
    }

    fn ensure_editable(&self) -> ClientResult<()> {
        match self.state {
            DialogState::Open => Ok(()),
            DialogState::Submitting => Err(ClientError::SubmissionInProgress),
            DialogState::Closed => Err(ClientError::validation("The movement dialog is closed")),
        }
    }

    /// Select the builder's item by id; it must be one the catalog offers
    pub fn select_item(&mut self, id: Uuid) -> ClientResult<()> {
        self.ensure_editable()?;
        let item = self
            .catalog
            .find_item(id)
            .cloned()
            .ok_or_else(|| ClientError::validation("Unknown item"))?;
        self.builder.select_item(Some(item));
        Ok(())
    }

    pub fn clear_item(&mut self) -> ClientResult<()> {
        self.ensure_editable()?;
        self.builder.select_item(None);
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i64) -> ClientResult<()> {
        self.ensure_editable()?;
        self.builder.set_quantity(quantity);
        Ok(())
    }

    pub fn set_lot_number(&mut self, lot_number: impl Into<String>) -> ClientResult<()> {
        self.ensure_editable()?;
        self.builder.set_lot_number(lot_number);
        Ok(())
    }

    pub fn set_expiry_date(&mut self, expiry_date: Option<NaiveDate>) -> ClientResult<()> {
        self.ensure_editable()?;
        self.builder.set_expiry_date(expiry_date);
        Ok(())
    }

    pub fn set_note(&mut self, note: impl Into<String>) -> ClientResult<()> {
        self.ensure_editable()?;
        self.header.note = note.into();
        Ok(())
    }

    /// Choose the destination sector (outbound only)
    pub fn select_sector(&mut self, id: Uuid) -> ClientResult<()> {
        self.ensure_editable()?;
        if !self.direction.requires_sector() {
            return Err(ClientError::validation(
                "Inbound movements have no destination sector",
            ));
        }
        let sector = self
            .catalog
            .find_sector(id)
            .cloned()
            .ok_or_else(|| ClientError::validation("Unknown sector"))?;
        self.header.destination = Some(sector);
        Ok(())
    }

    /// Whether the "Add" control should be enabled
    pub fn can_add_line(&self, today: NaiveDate) -> bool {
        self.state == DialogState::Open && self.builder.can_commit(today)
    }

    /// Commit the builder into the basket
    ///
    /// Incomplete fields leave the basket untouched and raise a warning.
    pub fn add_line(&mut self, today: NaiveDate) -> ClientResult<LineKey> {
        self.ensure_editable()?;
        match self.builder.commit(&mut self.basket, today) {
            Ok(key) => {
                debug!(%key, lines = self.basket.len(), "Line added to basket");
                Ok(key)
            }
            Err(reason) => {
                self.notifier.warning(reason);
                Err(ClientError::validation(reason))
            }
        }
    }

    /// Remove a line; unknown keys are ignored
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        if self.state != DialogState::Open {
            return false;
        }
        self.basket.remove_line(key)
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.state == DialogState::Open && validate_submission(&self.header, &self.basket).is_ok()
    }

    /// Validate and enter `Submitting`; nothing is sent yet
    ///
    /// A failed check is shown inline and raises no notification.
    pub fn begin_submit(&mut self, submitter: &MovementSubmitter) -> ClientResult<PendingSubmission> {
        self.ensure_editable()?;
        let request = match submitter.prepare(&self.header, &self.basket) {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.user_message(SUBMIT_FAILURE));
                return Err(e);
            }
        };
        self.state = DialogState::Submitting;
        self.error = None;
        Ok(PendingSubmission {
            generation: self.generation,
            request,
        })
    }

    /// Apply the backend's answer to a submission started by
    /// [`Self::begin_submit`]
    pub fn finish_submit<F: FnOnce()>(
        &mut self,
        pending: PendingSubmission,
        result: ClientResult<()>,
        on_saved: F,
    ) -> SubmitOutcome {
        if self.state != DialogState::Submitting || pending.generation != self.generation {
            debug!(
                pending = pending.generation,
                current = self.generation,
                "Ignoring stale submission result"
            );
            return SubmitOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                info!(
                    direction = %self.direction,
                    lines = pending.request.line_count(),
                    "Movement dialog completed"
                );
                self.basket.clear();
                self.notifier.success(SUBMIT_SUCCESS);
                on_saved();
                self.close();
                SubmitOutcome::Completed
            }
            Err(e) => {
                let message = e.user_message(SUBMIT_FAILURE);
                self.notifier.error(&message);
                self.error = Some(message);
                self.state = DialogState::Open;
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Submit the basket and wait for the answer
    ///
    /// `on_saved` runs once after a successful submission so dependent
    /// views can reload.
    pub async fn submit<F: FnOnce()>(
        &mut self,
        submitter: &MovementSubmitter,
        on_saved: F,
    ) -> ClientResult<()> {
        let pending = self.begin_submit(submitter)?;
        let result = submitter.send(pending.request()).await;
        match self.finish_submit(pending, result, on_saved) {
            SubmitOutcome::Completed | SubmitOutcome::Ignored => Ok(()),
            SubmitOutcome::Failed(e) => Err(e),
        }
    }
}
