//! End-to-end lifecycle over the file-backed store and sink.

use chrono::NaiveDate;
use receipt_ledger::{
    AccountMatch, Beneficiary, DraftStore, FileBlobStore, FileSink, Party, ReceiptData,
    ReceiptRenderer, ReceiptRepository, ReceiptStatus,
};

fn transfer(amount: f64, currency: &str) -> ReceiptData {
    ReceiptData {
        transfer_id: "TRF-20260214-K7Q2M9PX".to_string(),
        amount,
        currency: currency.to_string(),
        transfer_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
        transfer_time: None,
        reference: None,
        concept: Some("Licence renewal".to_string()),
        origin: Party {
            account_number: "DCB-MAIN-001".to_string(),
            account_name: "Digital Commercial Bank Ltd.".to_string(),
            bank_name: "Digital Commercial Bank".to_string(),
        },
        intermediary: Party {
            account_number: "40702810669000001880".to_string(),
            account_name: "OOO POINTER".to_string(),
            bank_name: "Sberbank Russia (PAO)".to_string(),
        },
        beneficiary: Beneficiary {
            name: "ACME LLC".to_string(),
            account_number: "123456789012".to_string(),
            bank_name: "Sberbank Russia (PAO)".to_string(),
            bic: Some("044525225".to_string()),
        },
        submission_status: None,
    }
}

#[test]
fn create_render_and_reload_from_disk() {
    let state_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let mut repo = ReceiptRepository::new(
        Box::new(FileBlobStore::new(state_dir.path()).unwrap()),
        ReceiptRenderer::new().unwrap(),
    )
    .unwrap()
    .with_sink(Box::new(FileSink::new(out_dir.path()).unwrap()));

    // Create with auto-render: downloaded once, document written to disk.
    let record = repo.create(transfer(1000.0, "USD"), true).unwrap();
    assert_eq!(record.status, ReceiptStatus::Downloaded);
    assert_eq!(record.download_count, 1);

    let expected = out_dir.path().join("receipt_4-K7Q2M9PX_20260214.png");
    let bytes = std::fs::read(&expected).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    // Re-render bumps the counter and rewrites the document.
    let doc = repo.render_existing(&record.receipt_id).unwrap();
    assert_eq!(doc.filename, "receipt_4-K7Q2M9PX_20260214.png");
    assert_eq!(repo.get(&record.receipt_id).unwrap().download_count, 2);

    // Queries see the persisted record.
    assert_eq!(
        repo.by_account("123456789012", AccountMatch::Exact).len(),
        1
    );

    // A fresh repository over the same directory sees the same state.
    drop(repo);
    let reopened = ReceiptRepository::new(
        Box::new(FileBlobStore::new(state_dir.path()).unwrap()),
        ReceiptRenderer::new().unwrap(),
    )
    .unwrap();
    let reloaded = reopened.get(&record.receipt_id).unwrap();
    assert_eq!(reloaded.download_count, 2);
    assert_eq!(reloaded.status, ReceiptStatus::Downloaded);
}

#[test]
fn draft_survives_reopen_and_clear() {
    let dir = tempfile::tempdir().unwrap();

    let mut drafts = DraftStore::new(Box::new(FileBlobStore::new(dir.path()).unwrap()));
    drafts
        .save(receipt_ledger::Draft {
            beneficiary_name: Some("ACME LLC".to_string()),
            ..Default::default()
        })
        .unwrap();
    drop(drafts);

    let mut reopened = DraftStore::new(Box::new(FileBlobStore::new(dir.path()).unwrap()));
    assert_eq!(
        reopened.get().beneficiary_name.as_deref(),
        Some("ACME LLC")
    );

    reopened.clear().unwrap();
    assert_eq!(reopened.get(), receipt_ledger::Draft::template());
}

#[test]
fn export_import_moves_collections_between_stores() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let mut source = ReceiptRepository::new(
        Box::new(FileBlobStore::new(dir_a.path()).unwrap()),
        ReceiptRenderer::new().unwrap(),
    )
    .unwrap();
    source.create(transfer(500.0, "EUR"), false).unwrap();
    source.create(transfer(125000.5, "RUB"), false).unwrap();

    let snapshot = source.export().unwrap();

    let mut target = ReceiptRepository::new(
        Box::new(FileBlobStore::new(dir_b.path()).unwrap()),
        ReceiptRenderer::new().unwrap(),
    )
    .unwrap();
    assert_eq!(target.import(&snapshot).unwrap(), 2);
    assert_eq!(target.list().len(), 2);

    let stats = target.stats();
    assert_eq!(stats.amount_by_currency["EUR"], 500.0);
    assert_eq!(stats.amount_by_currency["RUB"], 125000.5);
}
