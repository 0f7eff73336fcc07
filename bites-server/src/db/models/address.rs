//! Delivery Address Model
//!
//! Addresses are campus locations (hostel + room). They are soft-deleted
//! via the `status` flag so historical orders keep a resolvable reference.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub hostel_name: String,
    pub room_number: String,
    #[serde(default)]
    pub mobile: Option<String>,
    /// Soft-delete flag: false means removed
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub created_at: String,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressCreate {
    #[validate(length(min = 1, message = "Hostel name is required"))]
    pub hostel_name: String,
    #[validate(length(min = 1, message = "Room number is required"))]
    pub room_number: String,
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressUpdate {
    pub hostel_name: Option<String>,
    pub room_number: Option<String>,
    pub mobile: Option<String>,
}
