// Receipt Ledger - transfer receipt lifecycle store and document renderer

pub mod render;
pub mod repository;
pub mod storage;
pub mod types;

pub use render::{
    Language, LanguagePreference, ReceiptRenderer, RenderConfig, RenderError, RenderedDocument,
};
pub use repository::{
    AccountDirectory, AccountInfo, AccountMatch, DocumentSink, DraftStore, FileSink,
    ReceiptRepository, RepositoryError, SubscriptionId,
};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, StorageError};
pub use types::{
    AggregateStats, Beneficiary, Draft, Party, ReceiptData, ReceiptRecord, ReceiptStatus,
    SubmissionStatus,
};
