//! Field rules for items.

use axum_helpers::validation::{Validator, permitted_value, unique};
use strum::VariantNames;

use crate::models::{Item, ItemStatus};

pub const MAX_NAME_BYTES: usize = 500;

/// Record every rule `item` breaks.
///
/// For each field the first failing rule wins.
pub fn validate_item(v: &mut Validator, item: &Item) {
    v.check(!item.name.trim().is_empty(), "name", "must be provided");
    v.check(
        item.name.len() <= MAX_NAME_BYTES,
        "name",
        "must not exceed 500 bytes",
    );

    v.check(
        !item.description.trim().is_empty(),
        "description",
        "must be provided",
    );

    v.check(!item.status.trim().is_empty(), "status", "must be provided");
    v.check(
        permitted_value(&item.status.as_str(), ItemStatus::VARIANTS),
        "status",
        "must be a recognized status value",
    );

    v.check(
        unique(&item.mode),
        "mode",
        "must not contain duplicate values",
    );
}
