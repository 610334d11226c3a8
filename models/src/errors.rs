// models/src/errors.rs

pub use thiserror::Error;

/// A validation error raised while assigning ward/room state to a patient
/// record or serializing it. These are programmer-visible failures: they are
/// never silently corrected and the failed call leaves the record unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The ward number is not in the configured ward set.
    #[error("ward number {0} is not available")]
    InvalidWard(u8),
    /// The room number is not two decimal digits, or its leading digit does
    /// not name a configured ward.
    #[error("room number {0} is invalid")]
    InvalidRoomFormat(u16),
    /// The room does not belong to the ward the patient is already assigned to.
    #[error("room number {room} is not allocated in ward {ward}")]
    RoomWardMismatch { room: u16, ward: u8 },
    /// The record is missing a field required for serialization.
    #[error("patient record has no {0} assigned")]
    IncompleteRecord(&'static str),
    /// The gender value is not in the recognized set.
    #[error("gender '{0}' is not recognized")]
    InvalidGender(String),
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
