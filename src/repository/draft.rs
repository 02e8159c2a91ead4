//! Draft store
//!
//! Persists the single in-progress, not-yet-submitted receipt form. Reads
//! always overlay the persisted values on the fixed default template, so a
//! partial save never produces a form with holes.

use crate::storage::{BlobStore, DRAFT_KEY};
use crate::types::Draft;

use super::RepositoryError;

/// Collaborator contract: pre-resolved account details used only to
/// pre-fill draft fields. How the lookup works is not this subsystem's
/// concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInfo {
    pub id: String,
    pub display_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub currency: String,
}

pub trait AccountDirectory {
    fn lookup(&self, id: &str) -> Option<AccountInfo>;
}

/// Persists one draft behind its own storage key, independent of the
/// receipt collection.
pub struct DraftStore {
    store: Box<dyn BlobStore>,
}

impl DraftStore {
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// The current draft with every field present: persisted values
    /// overlaid on the default template. A corrupt or unreadable blob
    /// degrades to the template with a warning.
    pub fn get(&self) -> Draft {
        let mut draft = Draft::template();
        draft.merge(self.persisted());
        draft
    }

    /// Shallow-merge `partial` into the persisted draft. Only fields set
    /// in `partial` change.
    pub fn save(&mut self, partial: Draft) -> Result<(), RepositoryError> {
        let mut current = self.persisted();
        current.merge(partial);
        let bytes = serde_json::to_vec(&current)?;
        self.store.save(DRAFT_KEY, &bytes)?;
        Ok(())
    }

    /// Drop the persisted draft entirely; subsequent reads see the
    /// defaults again.
    pub fn clear(&mut self) -> Result<(), RepositoryError> {
        self.store.remove(DRAFT_KEY)?;
        Ok(())
    }

    /// Pre-fill the beneficiary block from a resolved account and return
    /// the updated draft.
    pub fn prefill_beneficiary(
        &mut self,
        account: &AccountInfo,
    ) -> Result<Draft, RepositoryError> {
        self.save(Draft {
            beneficiary_name: Some(account.display_name.clone()),
            beneficiary_account_number: Some(account.account_number.clone()),
            beneficiary_bank_name: Some(account.bank_name.clone()),
            currency: Some(account.currency.clone()),
            ..Draft::default()
        })?;
        Ok(self.get())
    }

    fn persisted(&self) -> Draft {
        match self.store.load(DRAFT_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(draft) => draft,
                Err(err) => {
                    log::warn!("corrupt draft blob, using defaults: {err}");
                    Draft::default()
                }
            },
            Ok(None) => Draft::default(),
            Err(err) => {
                log::warn!("draft blob unreadable, using defaults: {err}");
                Draft::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    fn store() -> DraftStore {
        DraftStore::new(Box::new(MemoryBlobStore::new()))
    }

    #[test]
    fn test_get_returns_template_when_empty() {
        let drafts = store();
        assert_eq!(drafts.get(), Draft::template());
    }

    #[test]
    fn test_save_merges_shallowly() {
        let mut drafts = store();
        drafts
            .save(Draft {
                beneficiary_name: Some("ACME LLC".to_string()),
                ..Draft::default()
            })
            .unwrap();
        drafts
            .save(Draft {
                amount: Some("1000".to_string()),
                ..Draft::default()
            })
            .unwrap();

        let draft = drafts.get();
        // Both partial saves survive.
        assert_eq!(draft.beneficiary_name.as_deref(), Some("ACME LLC"));
        assert_eq!(draft.amount.as_deref(), Some("1000"));
        // Untouched fields come from the template.
        assert_eq!(draft.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_clear_reverts_to_defaults() {
        let mut drafts = store();
        drafts
            .save(Draft {
                concept: Some("temp".to_string()),
                ..Draft::default()
            })
            .unwrap();
        drafts.clear().unwrap();
        assert_eq!(drafts.get(), Draft::template());
    }

    #[test]
    fn test_corrupt_draft_blob_degrades_to_template() {
        let mut backing = MemoryBlobStore::new();
        backing.save(DRAFT_KEY, b"]]not json[[").unwrap();
        let drafts = DraftStore::new(Box::new(backing));
        assert_eq!(drafts.get(), Draft::template());
    }

    #[test]
    fn test_prefill_beneficiary_from_account_lookup() {
        struct OneAccount;
        impl AccountDirectory for OneAccount {
            fn lookup(&self, id: &str) -> Option<AccountInfo> {
                (id == "acc-1").then(|| AccountInfo {
                    id: "acc-1".to_string(),
                    display_name: "ACME LLC".to_string(),
                    account_number: "123456789012".to_string(),
                    bank_name: "Sberbank Russia (PAO)".to_string(),
                    currency: "RUB".to_string(),
                })
            }
        }

        let mut drafts = store();
        let account = OneAccount.lookup("acc-1").unwrap();
        let draft = drafts.prefill_beneficiary(&account).unwrap();

        assert_eq!(draft.beneficiary_name.as_deref(), Some("ACME LLC"));
        assert_eq!(
            draft.beneficiary_account_number.as_deref(),
            Some("123456789012")
        );
        assert_eq!(draft.currency.as_deref(), Some("RUB"));
        // Fields the lookup does not cover keep their template values.
        assert_eq!(
            draft.origin_bank_name.as_deref(),
            Some("Digital Commercial Bank Ltd.")
        );
    }
}
