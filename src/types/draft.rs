//! Draft form state
//!
//! A `Draft` holds the not-yet-submitted field values of a receipt form.
//! Every field is optional; `get()` on the draft store overlays the
//! persisted values on a fixed default template so callers always see a
//! fully populated form.

use serde::{Deserialize, Serialize};

/// Unsubmitted receipt form values. Amount stays textual here; it is only
/// parsed and validated at submission time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub origin_account_number: Option<String>,
    pub origin_account_name: Option<String>,
    pub origin_bank_name: Option<String>,

    pub intermediary_account_number: Option<String>,
    pub intermediary_account_name: Option<String>,
    pub intermediary_bank_name: Option<String>,

    pub beneficiary_name: Option<String>,
    pub beneficiary_account_number: Option<String>,
    pub beneficiary_bank_name: Option<String>,
    pub beneficiary_bic: Option<String>,

    pub amount: Option<String>,
    pub currency: Option<String>,
    pub concept: Option<String>,
}

impl Draft {
    /// The fixed default template. Every field is present, so a partial
    /// save can never leave a hole in the form.
    pub fn template() -> Self {
        Self {
            origin_account_number: Some(String::new()),
            origin_account_name: Some(String::new()),
            origin_bank_name: Some("Digital Commercial Bank Ltd.".to_string()),
            intermediary_account_number: Some(String::new()),
            intermediary_account_name: Some(String::new()),
            intermediary_bank_name: Some(String::new()),
            beneficiary_name: Some(String::new()),
            beneficiary_account_number: Some(String::new()),
            beneficiary_bank_name: Some(String::new()),
            beneficiary_bic: Some(String::new()),
            amount: Some(String::new()),
            currency: Some("USD".to_string()),
            concept: Some(String::new()),
        }
    }

    /// Shallow merge: fields set in `other` replace fields in `self`,
    /// unset fields are left alone.
    pub fn merge(&mut self, other: Draft) {
        macro_rules! take {
            ($field:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field;
                }
            };
        }
        take!(origin_account_number);
        take!(origin_account_name);
        take!(origin_bank_name);
        take!(intermediary_account_number);
        take!(intermediary_account_name);
        take!(intermediary_bank_name);
        take!(beneficiary_name);
        take!(beneficiary_account_number);
        take!(beneficiary_bank_name);
        take!(beneficiary_bic);
        take!(amount);
        take!(currency);
        take!(concept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_defines_every_field() {
        let t = Draft::template();
        assert!(t.origin_account_number.is_some());
        assert!(t.beneficiary_bic.is_some());
        assert_eq!(t.currency.as_deref(), Some("USD"));
        assert_eq!(
            t.origin_bank_name.as_deref(),
            Some("Digital Commercial Bank Ltd.")
        );
    }

    #[test]
    fn test_merge_is_shallow_some_wins() {
        let mut base = Draft::template();
        base.beneficiary_name = Some("Old Name".to_string());

        let partial = Draft {
            beneficiary_name: Some("New Name".to_string()),
            ..Draft::default()
        };
        base.merge(partial);

        assert_eq!(base.beneficiary_name.as_deref(), Some("New Name"));
        // Untouched fields keep their previous values.
        assert_eq!(base.currency.as_deref(), Some("USD"));
    }
}
