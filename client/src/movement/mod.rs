//! Batch stock movement flow
//!
//! The pure composition pieces (builder, basket, payload) live in `shared`;
//! this module adds the catalog fetch, the network submission and the
//! dialog lifecycle around them.

mod catalog;
mod dialog;
mod submitter;

pub use catalog::{fetch_catalog, Catalog};
pub use dialog::{DialogState, MovementDialog, PendingSubmission, SubmitOutcome};
pub use submitter::MovementSubmitter;

use chrono::NaiveDate;

/// Local calendar date used for expiry checks
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
