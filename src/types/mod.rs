//! Core data model for the receipt subsystem

pub mod draft;
pub mod receipt;

pub use draft::Draft;
pub use receipt::{
    AggregateStats, Beneficiary, Party, ReceiptData, ReceiptRecord, ReceiptStatus,
    SubmissionStatus,
};
