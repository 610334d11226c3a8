// models/src/lib.rs

pub mod columns;
pub mod config;
pub mod errors;
pub mod medical;

pub use crate::config::WardConfig;
pub use crate::errors::{ValidationError, ValidationResult};
pub use crate::medical::patient::{Gender, Patient};
