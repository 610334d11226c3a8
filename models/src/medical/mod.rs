// models/src/medical/mod.rs

pub mod patient;

pub use patient::{Gender, Patient};
