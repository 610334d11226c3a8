// models/src/medical/patient.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::columns::{
    PATIENT_AGE_COLUMN, PATIENT_CHECKIN_COLUMN, PATIENT_CHECKOUT_COLUMN, PATIENT_GENDER_COLUMN,
    PATIENT_ID_COLUMN, PATIENT_NAME_COLUMN, PATIENT_ROOM_COLUMN, PATIENT_WARD_COLUMN,
};
use crate::config::WardConfig;
use crate::errors::{ValidationError, ValidationResult};

/// The recognized gender set. Extending it is a code change.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(ValidationError::InvalidGender(other.to_string())),
        }
    }
}

/// Represents a patient in the hospital.
///
/// A patient is created with a freshly generated identifier and a check-in
/// time of "now", then optionally allocated a ward and room under the rules
/// of a [`WardConfig`] before being serialized with [`Patient::to_payload`].
/// The identifier is assigned exactly once; no setter exists for it.
#[derive(Clone, Debug)]
pub struct Patient {
    id: Uuid,
    name: String,
    gender: Gender,
    age: u32,
    checkin_time: DateTime<Utc>,
    checkout_time: Option<DateTime<Utc>>,
    ward_number: Option<u8>,
    room_number: Option<u16>,
}

impl Patient {
    /// Creates a new patient record with ward, room and checkout unset.
    pub fn new(name: impl Into<String>, gender: Gender, age: u32) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.into(),
            gender,
            age,
            checkin_time: Utc::now(),
            checkout_time: None,
            ward_number: None,
            room_number: None,
        }
    }

    /// Generates a fresh patient identifier: 128 random bits, giving a
    /// negligible collision probability over the system's lifetime. No
    /// ordering is implied.
    pub fn generate_id() -> Uuid {
        Uuid::new_v4()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn checkin_time(&self) -> DateTime<Utc> {
        self.checkin_time
    }

    pub fn checkout_time(&self) -> Option<DateTime<Utc>> {
        self.checkout_time
    }

    pub fn ward(&self) -> Option<u8> {
        self.ward_number
    }

    pub fn room(&self) -> Option<u16> {
        self.room_number
    }

    /// Sets the check-in time, or the current time when `time` is `None`.
    pub fn set_checkin_time(&mut self, time: Option<DateTime<Utc>>) {
        self.checkin_time = time.unwrap_or_else(Utc::now);
    }

    /// Sets the check-out time, or the current time when `time` is `None`.
    /// Check-out is terminal for the stay; re-setting simply overwrites.
    pub fn set_checkout_time(&mut self, time: Option<DateTime<Utc>>) {
        self.checkout_time = Some(time.unwrap_or_else(Utc::now));
    }

    /// Allocates the patient to a ward, overwriting any previous value.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidWard`] if `ward` is not in the
    /// configured ward set; previous ward/room state is left unchanged.
    pub fn set_ward(&mut self, config: &WardConfig, ward: u8) -> ValidationResult<()> {
        if !config.contains_ward(ward) {
            return Err(ValidationError::InvalidWard(ward));
        }
        self.ward_number = Some(ward);
        Ok(())
    }

    /// Allocates the patient to a room.
    ///
    /// If a ward is already assigned, the room must be registered under that
    /// ward. Otherwise the ward is derived from the room's leading digit and
    /// both fields are assigned together; on any failure neither changes.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidRoomFormat`] when `room` is not two
    /// decimal digits or its leading digit is not a configured ward, and
    /// [`ValidationError::RoomWardMismatch`] when the room does not belong to
    /// the already-assigned ward.
    pub fn set_room(&mut self, config: &WardConfig, room: u16) -> ValidationResult<()> {
        let leading_digit = Self::validate_room_number(config, room)?;
        match self.ward_number {
            Some(ward) => {
                if !config.ward_has_room(ward, room) {
                    return Err(ValidationError::RoomWardMismatch { room, ward });
                }
                self.room_number = Some(room);
            }
            None => {
                self.ward_number = Some(leading_digit);
                self.room_number = Some(room);
            }
        }
        Ok(())
    }

    // A valid room number has exactly two decimal digits and its leading
    // digit names a configured ward. Returns the leading digit.
    fn validate_room_number(config: &WardConfig, room: u16) -> ValidationResult<u8> {
        if !(10..=99).contains(&room) {
            return Err(ValidationError::InvalidRoomFormat(room));
        }
        let leading_digit = (room / 10) as u8;
        if !config.contains_ward(leading_digit) {
            return Err(ValidationError::InvalidRoomFormat(room));
        }
        Ok(leading_digit)
    }

    /// Serializes the record to the canonical field mapping consumed by the
    /// storage layer. Timestamps are RFC 3339 strings; an absent checkout is
    /// JSON null.
    ///
    /// # Errors
    /// Returns [`ValidationError::IncompleteRecord`] if ward or room is
    /// unset: a record is only persistable once fully allocated.
    pub fn to_payload(&self) -> ValidationResult<Map<String, Value>> {
        let ward = self
            .ward_number
            .ok_or(ValidationError::IncompleteRecord("ward"))?;
        let room = self
            .room_number
            .ok_or(ValidationError::IncompleteRecord("room"))?;

        let checkout = match self.checkout_time {
            Some(time) => json!(time.to_rfc3339()),
            None => Value::Null,
        };

        let mut payload = Map::new();
        payload.insert(PATIENT_ID_COLUMN.to_string(), json!(self.id.to_string()));
        payload.insert(PATIENT_NAME_COLUMN.to_string(), json!(self.name));
        payload.insert(PATIENT_AGE_COLUMN.to_string(), json!(self.age));
        payload.insert(
            PATIENT_GENDER_COLUMN.to_string(),
            json!(self.gender.to_string()),
        );
        payload.insert(
            PATIENT_CHECKIN_COLUMN.to_string(),
            json!(self.checkin_time.to_rfc3339()),
        );
        payload.insert(PATIENT_CHECKOUT_COLUMN.to_string(), checkout);
        payload.insert(PATIENT_WARD_COLUMN.to_string(), json!(ward));
        payload.insert(PATIENT_ROOM_COLUMN.to_string(), json!(room));
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use serde_json::Value;
    use uuid::Uuid;

    use super::{Gender, Patient};
    use crate::columns::{
        PATIENT_AGE_COLUMN, PATIENT_CHECKOUT_COLUMN, PATIENT_COLUMNS, PATIENT_ID_COLUMN,
        PATIENT_ROOM_COLUMN, PATIENT_WARD_COLUMN,
    };
    use crate::config::WardConfig;
    use crate::errors::ValidationError;

    fn jane() -> Patient {
        Patient::new("Jane Doe", Gender::Female, 30)
    }

    #[test]
    fn should_generate_distinct_ids() {
        let ids: HashSet<Uuid> = (0..1000).map(|_| jane().id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn should_check_in_at_creation_with_nothing_allocated() {
        let patient = jane();
        assert_eq!(patient.name(), "Jane Doe");
        assert_eq!(patient.gender(), Gender::Female);
        assert_eq!(patient.age(), 30);
        assert!(patient.ward().is_none());
        assert!(patient.room().is_none());
        assert!(patient.checkout_time().is_none());
    }

    #[test]
    fn should_derive_ward_from_room_leading_digit() {
        let config = WardConfig::default();
        let mut patient = jane();
        patient.set_room(&config, 23).unwrap();
        assert_eq!(patient.ward(), Some(2));
        assert_eq!(patient.room(), Some(23));
    }

    #[test]
    fn should_accept_room_within_assigned_ward() {
        let config = WardConfig::default();
        let mut patient = jane();
        patient.set_ward(&config, 4).unwrap();
        patient.set_room(&config, 47).unwrap();
        assert_eq!(patient.ward(), Some(4));
        assert_eq!(patient.room(), Some(47));
    }

    #[test]
    fn should_reject_unknown_ward_and_keep_state() {
        let config = WardConfig::default();
        let mut patient = jane();
        patient.set_ward(&config, 3).unwrap();
        let err = patient.set_ward(&config, 9).unwrap_err();
        assert_eq!(err, ValidationError::InvalidWard(9));
        assert_eq!(patient.ward(), Some(3));
    }

    #[test]
    fn should_reject_room_outside_assigned_ward() {
        let config = WardConfig::default();
        let mut patient = jane();
        patient.set_ward(&config, 2).unwrap();
        let err = patient.set_room(&config, 31).unwrap_err();
        assert_eq!(err, ValidationError::RoomWardMismatch { room: 31, ward: 2 });
        assert_eq!(patient.ward(), Some(2));
        assert!(patient.room().is_none());
    }

    #[test]
    fn should_reject_malformed_room_numbers() {
        let config = WardConfig::default();
        let mut patient = jane();
        for room in [5, 123, 91] {
            let err = patient.set_room(&config, room).unwrap_err();
            assert_eq!(err, ValidationError::InvalidRoomFormat(room));
            assert!(patient.ward().is_none());
            assert!(patient.room().is_none());
        }
    }

    #[test]
    fn should_overwrite_checkout_time_on_reset() {
        let mut patient = jane();
        patient.set_checkout_time(None);
        let first = patient.checkout_time().unwrap();
        let later = first + chrono::Duration::hours(1);
        patient.set_checkout_time(Some(later));
        assert_eq!(patient.checkout_time(), Some(later));
    }

    #[test]
    fn should_build_payload_with_all_columns() {
        let config = WardConfig::default();
        let mut patient = jane();
        patient.set_room(&config, 23).unwrap();
        let payload = patient.to_payload().unwrap();

        for column in PATIENT_COLUMNS {
            assert!(payload.contains_key(column), "missing column {column}");
        }
        let id = payload[PATIENT_ID_COLUMN].as_str().unwrap();
        assert_eq!(Uuid::from_str(id).unwrap(), patient.id());
        assert_eq!(payload[PATIENT_AGE_COLUMN], Value::from(30));
        assert_eq!(payload[PATIENT_WARD_COLUMN], Value::from(2));
        assert_eq!(payload[PATIENT_ROOM_COLUMN], Value::from(23));
        assert_eq!(payload[PATIENT_CHECKOUT_COLUMN], Value::Null);
    }

    #[test]
    fn should_not_serialize_before_room_is_allocated() {
        let patient = jane();
        let err = patient.to_payload().unwrap_err();
        assert_eq!(err, ValidationError::IncompleteRecord("ward"));
    }

    #[test]
    fn should_parse_gender_from_str() {
        assert_eq!(Gender::from_str("Male").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("Female").unwrap(), Gender::Female);
        let err = Gender::from_str("unknown").unwrap_err();
        assert_eq!(err, ValidationError::InvalidGender("unknown".to_string()));
    }
}
