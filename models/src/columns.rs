// models/src/columns.rs

//! Canonical column names for the patient table. The payload mappings
//! produced by [`crate::Patient::to_payload`] and consumed by the storage
//! layer are keyed by exactly these names.

pub const PATIENT_ID_COLUMN: &str = "patient_id";
pub const PATIENT_NAME_COLUMN: &str = "patient_name";
pub const PATIENT_AGE_COLUMN: &str = "patient_age";
pub const PATIENT_GENDER_COLUMN: &str = "patient_gender";
pub const PATIENT_CHECKIN_COLUMN: &str = "patient_checkin";
pub const PATIENT_CHECKOUT_COLUMN: &str = "patient_checkout";
pub const PATIENT_WARD_COLUMN: &str = "patient_ward";
pub const PATIENT_ROOM_COLUMN: &str = "patient_room";

/// All patient columns, in table order.
pub const PATIENT_COLUMNS: [&str; 8] = [
    PATIENT_ID_COLUMN,
    PATIENT_NAME_COLUMN,
    PATIENT_AGE_COLUMN,
    PATIENT_GENDER_COLUMN,
    PATIENT_CHECKIN_COLUMN,
    PATIENT_CHECKOUT_COLUMN,
    PATIENT_WARD_COLUMN,
    PATIENT_ROOM_COLUMN,
];
