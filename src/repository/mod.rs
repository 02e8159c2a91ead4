//! Receipt lifecycle repository
//!
//! The repository owns the durable, ordered collection of issued receipts.
//! Every mutating operation persists its change and notifies subscribers
//! before it returns, so an observer always sees a fully committed
//! snapshot. The whole subsystem is synchronous and single-threaded.

pub mod draft;

use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::render::{ReceiptRenderer, RenderError, RenderedDocument};
use crate::storage::{BlobStore, StorageError, RECEIPTS_KEY};
use crate::types::{AggregateStats, ReceiptData, ReceiptRecord, ReceiptStatus};

pub use draft::{AccountDirectory, AccountInfo, DraftStore};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Receipt not found: {0}")]
    NotFound(String),

    #[error("Validation failed for {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Document sink error: {0}")]
    Sink(std::io::Error),
}

/// Receives rendered documents. The repository pushes every document it
/// renders through its sink, mirroring the auto-download behavior of the
/// original receipt flow.
pub trait DocumentSink {
    fn deliver(&mut self, document: &RenderedDocument) -> std::io::Result<()>;
}

/// Writes each delivered document to a file named by its deterministic
/// filename.
pub struct FileSink {
    base_dir: PathBuf,
}

impl FileSink {
    pub fn new(base_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
        }
        Ok(Self { base_dir })
    }
}

impl DocumentSink for FileSink {
    fn deliver(&mut self, document: &RenderedDocument) -> std::io::Result<()> {
        fs::write(self.base_dir.join(&document.filename), &document.bytes)
    }
}

/// How account-number queries compare against the needle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountMatch {
    Exact,
    Contains,
}

/// Callback invoked with the full post-mutation collection.
pub type Listener = Box<dyn Fn(&[ReceiptRecord])>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct ReceiptRepository {
    store: Box<dyn BlobStore>,
    sink: Option<Box<dyn DocumentSink>>,
    renderer: ReceiptRenderer,
    records: Vec<ReceiptRecord>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

impl ReceiptRepository {
    /// Open the repository over a blob store, loading any persisted
    /// collection. A corrupt blob is recovered as an empty collection with
    /// a warning; there is no checksum to distinguish corruption from a
    /// never-written store.
    pub fn new(
        store: Box<dyn BlobStore>,
        renderer: ReceiptRenderer,
    ) -> Result<Self, RepositoryError> {
        let records = match store.load(RECEIPTS_KEY)? {
            Some(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(err) => {
                    log::warn!("corrupt receipt collection blob, starting empty: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Ok(Self {
            store,
            sink: None,
            renderer,
            records,
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    /// Attach a sink that receives every rendered document.
    pub fn with_sink(mut self, sink: Box<dyn DocumentSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    // === Lifecycle ===

    /// Create and persist a new receipt.
    ///
    /// With `auto_render` the receipt starts life as `downloaded` with one
    /// download on the counter and the document is rendered synchronously;
    /// otherwise it starts as `generated` with a zero counter. The new
    /// record is prepended so the collection stays newest-first.
    pub fn create(
        &mut self,
        data: ReceiptData,
        auto_render: bool,
    ) -> Result<ReceiptRecord, RepositoryError> {
        validate_data(&data)?;

        let now = Utc::now();
        let receipt_id = self.mint_unique_id(now);
        let transfer_id = if data.transfer_id.trim().is_empty() {
            receipt_id.clone()
        } else {
            data.transfer_id.clone()
        };

        let record = ReceiptRecord {
            receipt_id: receipt_id.clone(),
            transfer_id,
            amount: data.amount,
            currency: data.currency,
            transfer_date: data.transfer_date,
            transfer_time: data.transfer_time,
            reference: data.reference,
            concept: data.concept,
            origin: data.origin,
            intermediary: data.intermediary,
            beneficiary: data.beneficiary,
            submission_status: data.submission_status,
            status: if auto_render {
                ReceiptStatus::Downloaded
            } else {
                ReceiptStatus::Generated
            },
            created_at: now,
            download_count: if auto_render { 1 } else { 0 },
            last_downloaded_at: auto_render.then_some(now),
        };

        self.records.insert(0, record.clone());
        self.commit()?;

        if auto_render {
            let document = self.renderer.render(&record, None)?;
            self.deliver(&document)?;
        }

        log::debug!("receipt created: {receipt_id}");
        Ok(record)
    }

    /// Re-render an existing receipt, advancing its download counters.
    ///
    /// The status moves to `downloaded` unless the receipt is archived;
    /// archived is terminal for everything except deletion.
    pub fn render_existing(
        &mut self,
        receipt_id: &str,
    ) -> Result<RenderedDocument, RepositoryError> {
        let pos = self.position(receipt_id)?;
        let now = Utc::now();
        {
            let record = &mut self.records[pos];
            record.download_count += 1;
            record.last_downloaded_at = Some(now);
            if record.status != ReceiptStatus::Archived {
                record.status = ReceiptStatus::Downloaded;
            }
        }
        self.commit()?;

        let record = self.records[pos].clone();
        let document = self.renderer.render(&record, None)?;
        self.deliver(&document)?;

        log::debug!(
            "receipt rendered: {receipt_id} (download #{})",
            record.download_count
        );
        Ok(document)
    }

    /// Mark a receipt archived. There is no un-archive path; deletion is
    /// the only exit.
    pub fn archive(&mut self, receipt_id: &str) -> Result<(), RepositoryError> {
        let pos = self.position(receipt_id)?;
        self.records[pos].status = ReceiptStatus::Archived;
        self.commit()?;
        log::debug!("receipt archived: {receipt_id}");
        Ok(())
    }

    /// Remove a receipt from the collection.
    pub fn delete(&mut self, receipt_id: &str) -> Result<(), RepositoryError> {
        let pos = self.position(receipt_id)?;
        self.records.remove(pos);
        self.commit()?;
        log::debug!("receipt deleted: {receipt_id}");
        Ok(())
    }

    /// Remove every receipt created strictly before `now - days`. Returns
    /// the number removed.
    pub fn retention_sweep(&mut self, days: i64) -> Result<usize, RepositoryError> {
        let cutoff = Utc::now() - Duration::days(days);
        let before = self.records.len();
        self.records.retain(|r| r.created_at >= cutoff);
        let removed = before - self.records.len();
        if removed > 0 {
            self.commit()?;
            log::info!("retention sweep removed {removed} receipts older than {days} days");
        }
        Ok(removed)
    }

    // === Queries ===

    /// The full collection, newest first.
    pub fn list(&self) -> &[ReceiptRecord] {
        &self.records
    }

    pub fn get(&self, receipt_id: &str) -> Option<&ReceiptRecord> {
        self.records.iter().find(|r| r.receipt_id == receipt_id)
    }

    /// Receipts whose transfer date falls within `[start, end]`, bounds
    /// included.
    pub fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<ReceiptRecord> {
        self.records
            .iter()
            .filter(|r| r.transfer_date >= start && r.transfer_date <= end)
            .cloned()
            .collect()
    }

    /// Receipts where any of the three account-number fields matches the
    /// needle.
    pub fn by_account(&self, needle: &str, mode: AccountMatch) -> Vec<ReceiptRecord> {
        self.records
            .iter()
            .filter(|r| {
                r.account_numbers().iter().any(|n| match mode {
                    AccountMatch::Exact => *n == needle,
                    AccountMatch::Contains => n.contains(needle),
                })
            })
            .cloned()
            .collect()
    }

    /// Aggregate view of the collection, computed against call time.
    pub fn stats(&self) -> AggregateStats {
        let now = Utc::now();
        let week_ago = now - Duration::days(7);
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);

        let mut stats = AggregateStats {
            total: self.records.len(),
            ..AggregateStats::default()
        };
        for record in &self.records {
            match record.status {
                ReceiptStatus::Generated => stats.generated += 1,
                ReceiptStatus::Downloaded => stats.downloaded += 1,
                ReceiptStatus::Archived => stats.archived += 1,
            }
            *stats
                .amount_by_currency
                .entry(record.currency.clone())
                .or_insert(0.0) += record.amount;
            if record.created_at >= week_ago {
                stats.last_seven_days += 1;
            }
            if record.created_at >= month_start {
                stats.this_month += 1;
            }
        }
        stats
    }

    // === Subscriptions ===

    /// Register a listener. It is invoked immediately with the current
    /// collection, then once per mutating operation with the post-mutation
    /// collection.
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        Self::invoke(id, &listener, &self.records);
        self.listeners.push((id, listener));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id.0);
    }

    // === Import / export ===

    /// Serialize the full collection as a JSON snapshot.
    pub fn export(&self) -> Result<String, RepositoryError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Merge records from a snapshot, skipping any receipt id already
    /// present. Returns the number actually added.
    pub fn import(&mut self, snapshot: &str) -> Result<usize, RepositoryError> {
        let imported: Vec<ReceiptRecord> = serde_json::from_str(snapshot)?;
        let mut added = 0;
        for record in imported {
            if self.get(&record.receipt_id).is_some() {
                continue;
            }
            self.records.push(record);
            added += 1;
        }
        if added > 0 {
            self.commit()?;
            log::info!("imported {added} receipts");
        }
        Ok(added)
    }

    // === Internals ===

    fn position(&self, receipt_id: &str) -> Result<usize, RepositoryError> {
        self.records
            .iter()
            .position(|r| r.receipt_id == receipt_id)
            .ok_or_else(|| RepositoryError::NotFound(receipt_id.to_string()))
    }

    /// Persist the collection, then notify every subscriber.
    fn commit(&mut self) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec(&self.records)?;
        self.store.save(RECEIPTS_KEY, &bytes)?;
        for (id, listener) in &self.listeners {
            Self::invoke(*id, listener, &self.records);
        }
        Ok(())
    }

    /// A panicking listener must not corrupt repository state or starve
    /// the remaining listeners.
    fn invoke(id: u64, listener: &Listener, records: &[ReceiptRecord]) {
        if catch_unwind(AssertUnwindSafe(|| listener(records))).is_err() {
            log::warn!("receipt listener {id} panicked; continuing");
        }
    }

    fn deliver(&mut self, document: &RenderedDocument) -> Result<(), RepositoryError> {
        if let Some(sink) = &mut self.sink {
            sink.deliver(document).map_err(RepositoryError::Sink)?;
        }
        Ok(())
    }

    fn mint_unique_id(&self, now: DateTime<Utc>) -> String {
        loop {
            let id = mint_receipt_id(now);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Collision-resistant id: current date plus a random eight-character
/// suffix, e.g. `RCP-20260115-AB12CD34`.
fn mint_receipt_id(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();
    format!("RCP-{}-{}", now.format("%Y%m%d"), suffix)
}

fn validate_data(data: &ReceiptData) -> Result<(), RepositoryError> {
    if !data.amount.is_finite() || data.amount < 0.0 {
        return Err(RepositoryError::Validation {
            field: "amount",
            reason: format!("must be a finite non-negative number, got {}", data.amount),
        });
    }
    if data.currency.trim().is_empty() {
        return Err(RepositoryError::Validation {
            field: "currency",
            reason: "must not be empty".to_string(),
        });
    }
    if data.beneficiary.name.trim().is_empty() {
        return Err(RepositoryError::Validation {
            field: "beneficiary.name",
            reason: "must not be empty".to_string(),
        });
    }
    if data.beneficiary.account_number.trim().is_empty() {
        return Err(RepositoryError::Validation {
            field: "beneficiary.account_number",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
