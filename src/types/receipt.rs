//! Receipt record types
//!
//! A `ReceiptRecord` is a persisted proof-of-transfer entity. It is created
//! once from a `ReceiptData` payload, then only mutated by the repository's
//! lifecycle operations (re-render, archive, delete).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle status of a stored receipt.
///
/// Transitions are one-way: `generated -> downloaded -> archived`. An
/// archived receipt keeps its status until it is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Generated,
    Downloaded,
    Archived,
}

/// Transient submission state a caller may attach to a receipt.
///
/// These never drive the lifecycle; they only select the badge shown on the
/// rendered document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Completed,
    Pending,
    Processing,
    Signed,
    Submitted,
}

/// One account block on a receipt (origin or intermediary role).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub account_number: String,
    pub account_name: String,
    pub bank_name: String,
}

/// The final recipient block. Unlike the other roles it carries a bank
/// identifier code.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub bic: Option<String>,
}

/// Creation payload for a new receipt.
///
/// An empty `transfer_id` is allowed; the repository substitutes the minted
/// receipt id in that case.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    pub transfer_id: String,
    pub amount: f64,
    pub currency: String,
    pub transfer_date: NaiveDate,
    pub transfer_time: Option<NaiveTime>,
    pub reference: Option<String>,
    pub concept: Option<String>,
    pub origin: Party,
    pub intermediary: Party,
    pub beneficiary: Beneficiary,
    pub submission_status: Option<SubmissionStatus>,
}

/// A stored receipt: the creation payload plus repository-owned metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub receipt_id: String,
    pub transfer_id: String,
    pub amount: f64,
    pub currency: String,
    pub transfer_date: NaiveDate,
    pub transfer_time: Option<NaiveTime>,
    pub reference: Option<String>,
    pub concept: Option<String>,
    pub origin: Party,
    pub intermediary: Party,
    pub beneficiary: Beneficiary,
    pub submission_status: Option<SubmissionStatus>,
    pub status: ReceiptStatus,
    pub created_at: DateTime<Utc>,
    pub download_count: u32,
    pub last_downloaded_at: Option<DateTime<Utc>>,
}

impl ReceiptRecord {
    /// All three account-number fields, in role order.
    pub fn account_numbers(&self) -> [&str; 3] {
        [
            &self.origin.account_number,
            &self.intermediary.account_number,
            &self.beneficiary.account_number,
        ]
    }
}

/// Aggregate view over the collection, derived at call time and never stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub total: usize,
    pub generated: usize,
    pub downloaded: usize,
    pub archived: usize,
    /// Sum of amounts per currency code.
    pub amount_by_currency: HashMap<String, f64>,
    /// Receipts created within the trailing seven days.
    pub last_seven_days: usize,
    /// Receipts created within the current calendar month.
    pub this_month: usize,
}
