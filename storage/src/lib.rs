// storage/src/lib.rs

pub mod errors;
pub mod patient_store;

pub use crate::errors::{StorageError, StorageResult};
pub use crate::patient_store::PatientStore;
