//! Document languages and string tables
//!
//! The three supported tables share one `Strings` struct of `&'static str`
//! fields, so every language defines the identical key set by construction;
//! a missing label cannot compile.

use serde::{Deserialize, Serialize};

/// Languages a document can be rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
    Ru,
}

impl Language {
    /// Parse a stored language code.
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            "ru" => Some(Language::Ru),
            _ => None,
        }
    }
}

/// Collaborator contract: a persisted language preference, consulted only
/// when no explicit language is passed to the renderer.
pub trait LanguagePreference {
    fn preferred(&self) -> Option<Language>;
}

/// Resolve the document language.
///
/// Precedence: explicit argument, stored preference, runtime locale prefix,
/// fixed English default.
pub(crate) fn resolve_language(
    explicit: Option<Language>,
    preference: Option<&dyn LanguagePreference>,
) -> Language {
    if let Some(lang) = explicit {
        return lang;
    }
    if let Some(lang) = preference.and_then(|p| p.preferred()) {
        return lang;
    }
    locale_language().unwrap_or(Language::En)
}

fn locale_language() -> Option<Language> {
    let raw = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .ok()?;
    let raw = raw.to_ascii_lowercase();
    if raw.starts_with("es") {
        Some(Language::Es)
    } else if raw.starts_with("ru") {
        Some(Language::Ru)
    } else if raw.starts_with("en") {
        Some(Language::En)
    } else {
        None
    }
}

/// All labels a rendered document needs, in one language.
pub struct Strings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub receipt_no: &'static str,
    pub amount: &'static str,
    pub origin_account: &'static str,
    pub account: &'static str,
    pub bank: &'static str,
    pub account_name: &'static str,
    pub intermediary_account: &'static str,
    pub beneficiary: &'static str,
    pub beneficiary_name: &'static str,
    pub beneficiary_account: &'static str,
    pub beneficiary_bank: &'static str,
    pub bic: &'static str,
    pub concept: &'static str,
    pub reference: &'static str,
    pub transaction_id: &'static str,
    pub footer1: &'static str,
    pub footer2: &'static str,
    pub footer3: &'static str,
    pub completed: &'static str,
    pub pending: &'static str,
    pub processing: &'static str,
    pub signed: &'static str,
    pub submitted: &'static str,
    pub generated: &'static str,
    pub downloaded: &'static str,
    pub archived: &'static str,
}

static ES: Strings = Strings {
    title: "COMPROBANTE DE TRANSFERENCIA",
    subtitle: "Digital Commercial Bank Ltd.",
    receipt_no: "Comprobante Nº",
    amount: "IMPORTE",
    origin_account: "CUENTA ORIGEN (DCB)",
    account: "Cuenta",
    bank: "Banco",
    account_name: "Titular",
    intermediary_account: "CUENTA INTERMEDIARIA",
    beneficiary: "BENEFICIARIO FINAL",
    beneficiary_name: "Nombre",
    beneficiary_account: "Cuenta",
    beneficiary_bank: "Banco",
    bic: "BIC",
    concept: "CONCEPTO",
    reference: "Referencia",
    transaction_id: "ID Transacción",
    footer1: "Este documento es un comprobante oficial de transferencia bancaria.",
    footer2: "Digital Commercial Bank Ltd. | Licencia Bancaria DCB-2024-001",
    footer3: "ISO 27001 Certified | FATF Compliant | Swift Member",
    completed: "COMPLETADO",
    pending: "PENDIENTE",
    processing: "EN PROCESO",
    signed: "FIRMADO",
    submitted: "ENVIADO",
    generated: "GENERADO",
    downloaded: "DESCARGADO",
    archived: "ARCHIVADO",
};

static EN: Strings = Strings {
    title: "TRANSFER RECEIPT",
    subtitle: "Digital Commercial Bank Ltd.",
    receipt_no: "Receipt No.",
    amount: "AMOUNT",
    origin_account: "ORIGIN ACCOUNT (DCB)",
    account: "Account",
    bank: "Bank",
    account_name: "Account Holder",
    intermediary_account: "INTERMEDIARY ACCOUNT",
    beneficiary: "FINAL BENEFICIARY",
    beneficiary_name: "Name",
    beneficiary_account: "Account",
    beneficiary_bank: "Bank",
    bic: "BIC",
    concept: "PURPOSE",
    reference: "Reference",
    transaction_id: "Transaction ID",
    footer1: "This document is an official bank transfer receipt.",
    footer2: "Digital Commercial Bank Ltd. | Banking License DCB-2024-001",
    footer3: "ISO 27001 Certified | FATF Compliant | Swift Member",
    completed: "COMPLETED",
    pending: "PENDING",
    processing: "PROCESSING",
    signed: "SIGNED",
    submitted: "SUBMITTED",
    generated: "GENERATED",
    downloaded: "DOWNLOADED",
    archived: "ARCHIVED",
};

static RU: Strings = Strings {
    title: "ПЛАТЕЖНОЕ ПОРУЧЕНИЕ",
    subtitle: "Digital Commercial Bank Ltd.",
    receipt_no: "Квитанция №",
    amount: "СУММА",
    origin_account: "СЧЕТ ОТПРАВИТЕЛЯ (DCB)",
    account: "Счет",
    bank: "Банк",
    account_name: "Владелец счета",
    intermediary_account: "ПРОМЕЖУТОЧНЫЙ СЧЕТ",
    beneficiary: "КОНЕЧНЫЙ ПОЛУЧАТЕЛЬ",
    beneficiary_name: "Наименование",
    beneficiary_account: "Счет",
    beneficiary_bank: "Банк",
    bic: "БИК",
    concept: "НАЗНАЧЕНИЕ ПЛАТЕЖА",
    reference: "Референс",
    transaction_id: "ID Транзакции",
    footer1: "Данный документ является официальной квитанцией банковского перевода.",
    footer2: "Digital Commercial Bank Ltd. | Банковская лицензия DCB-2024-001",
    footer3: "ISO 27001 Certified | FATF Compliant | Swift Member",
    completed: "ИСПОЛНЕНО",
    pending: "ОЖИДАНИЕ",
    processing: "В ОБРАБОТКЕ",
    signed: "ПОДПИСАНО",
    submitted: "ОТПРАВЛЕНО",
    generated: "СОЗДАНО",
    downloaded: "ЗАГРУЖЕНО",
    archived: "В АРХИВЕ",
};

/// The string table for a language.
pub fn strings(lang: Language) -> &'static Strings {
    match lang {
        Language::Es => &ES,
        Language::En => &EN,
        Language::Ru => &RU,
    }
}
