//! Validation utilities for the Pharmacy Stock client
//!
//! These mirror the checks the forms apply before anything is sent to the
//! backend. The backend re-validates everything.

use chrono::NaiveDate;
use validator::Validate;

use crate::models::{
    AlertSettings, ItemInput, ItemKind, LotAdjustment, NewEmployee, ProfileUpdate, SectorInput,
    MIN_PASSWORD_LENGTH,
};

/// Longest lot number the backend stores
pub const MAX_LOT_NUMBER_LENGTH: usize = 50;

// ============================================================================
// Movement Validations
// ============================================================================

/// Validate a line quantity and narrow it to the wire type
pub fn validate_quantity(quantity: i64) -> Result<u32, &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be greater than zero");
    }
    u32::try_from(quantity).map_err(|_| "Quantity is too large")
}

/// Validate a lot number (inbound movements only)
pub fn validate_lot_number(lot_number: &str) -> Result<(), &'static str> {
    let trimmed = lot_number.trim();
    if trimmed.is_empty() {
        return Err("Lot number is required");
    }
    if trimmed.chars().count() > MAX_LOT_NUMBER_LENGTH {
        return Err("Lot number is too long");
    }
    Ok(())
}

/// Expiry dates of incoming lots must be strictly after today
pub fn validate_expiry_date(expiry_date: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if expiry_date <= today {
        return Err("Expiry date must be after today");
    }
    Ok(())
}

/// Validate a manual lot correction
pub fn validate_lot_adjustment(adjustment: &LotAdjustment) -> Result<(), &'static str> {
    if adjustment.new_quantity < 0 {
        return Err("Quantity cannot be negative");
    }
    if adjustment.note.trim().is_empty() {
        return Err("A note explaining the adjustment is required");
    }
    Ok(())
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate an item form for the given category
pub fn validate_item_input(input: &ItemInput, kind: ItemKind) -> Result<(), &'static str> {
    if input.name.trim().is_empty() {
        return Err("Name is required");
    }
    if input.description.trim().is_empty() {
        return Err("Description is required");
    }
    input
        .validate()
        .map_err(|_| "Minimum stock cannot be negative")?;

    match (kind, input.medicine_type) {
        (ItemKind::Medicine, None) => Err("Select the medicine type"),
        (ItemKind::Supply, Some(_)) => Err("Supplies do not have a medicine type"),
        _ => Ok(()),
    }
}

/// Validate a sector form
pub fn validate_sector_input(input: &SectorInput) -> Result<(), &'static str> {
    if input.name.trim().is_empty() {
        return Err("Sector name is required");
    }
    input.validate().map_err(|_| "Sector name is too long")
}

// ============================================================================
// Settings Validations
// ============================================================================

/// Validate alert thresholds
pub fn validate_alert_settings(settings: &AlertSettings) -> Result<(), &'static str> {
    if settings.expiry_warning_days < 1 {
        return Err("Expiry warning must be at least one day");
    }
    Ok(())
}

// ============================================================================
// User Validations
// ============================================================================

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if (password.chars().count() as u64) < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// Validate that a password and its confirmation match
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if password != confirmation {
        return Err("Passwords do not match");
    }
    Ok(())
}

/// Validate the new-employee form, including the repeated password
pub fn validate_new_employee(employee: &NewEmployee, confirmation: &str) -> Result<(), &'static str> {
    if employee.name.trim().is_empty() {
        return Err("Name is required");
    }
    if employee.login.trim().is_empty() {
        return Err("Login is required");
    }
    validate_password(&employee.password)?;
    validate_password_confirmation(&employee.password, confirmation)?;
    employee
        .validate()
        .map_err(|_| "Employee form is incomplete")
}

/// Validate the profile form
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), &'static str> {
    if update.name.trim().is_empty() || update.login.trim().is_empty() {
        return Err("Name and login are required");
    }
    update.validate().map_err(|_| "Name and login are required")
}
