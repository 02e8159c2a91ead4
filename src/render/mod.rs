//! Deterministic receipt document renderer
//!
//! This module maps one receipt record (plus a language) to a fixed-layout
//! PNG document. Rendering is a pure function of its inputs: the same
//! record, language, and generation timestamp always produce the same
//! bytes.

pub mod currency;
pub mod i18n;

mod layout;
mod text;

use std::io::Cursor;

use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::types::ReceiptRecord;

pub use i18n::{Language, LanguagePreference, Strings};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Embedded font failed to parse: {0}")]
    FontUnavailable(&'static str),

    #[error("Amount is not a finite non-negative number: {0}")]
    InvalidAmount(f64),

    #[error("Required field is missing: {0}")]
    MissingField(&'static str),
}

/// The rendered document plus its deterministic filename.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Renderer configuration. Branding lines appear on every document.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Headline across the top of the document.
    pub bank_name: String,
    /// Prefix of generated filenames.
    pub filename_prefix: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bank_name: "DIGITAL COMMERCIAL BANK".to_string(),
            filename_prefix: "receipt".to_string(),
        }
    }
}

/// Renders receipt records into fixed-layout PNG documents.
///
/// Holds no mutable state; one renderer can serve any number of records.
pub struct ReceiptRenderer {
    pub(crate) fonts: text::FontSet,
    pub(crate) config: RenderConfig,
    preference: Option<Box<dyn LanguagePreference>>,
}

impl ReceiptRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Result<Self, RenderError> {
        Ok(Self {
            fonts: text::FontSet::load()?,
            config,
            preference: None,
        })
    }

    /// Attach a stored language preference, consulted when `render` is
    /// called without an explicit language.
    pub fn with_language_preference(mut self, preference: Box<dyn LanguagePreference>) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Render `record` into a document, stamping the current time into the
    /// footer.
    pub fn render(
        &self,
        record: &ReceiptRecord,
        language: Option<Language>,
    ) -> Result<RenderedDocument, RenderError> {
        self.render_at(record, language, Utc::now())
    }

    /// Render with an explicit generation timestamp. Apart from that stamp
    /// the output is byte-identical across calls with equal inputs.
    pub fn render_at(
        &self,
        record: &ReceiptRecord,
        language: Option<Language>,
        generated_at: DateTime<Utc>,
    ) -> Result<RenderedDocument, RenderError> {
        validate(record)?;

        let lang = i18n::resolve_language(language, self.preference.as_deref());
        let canvas = self.paint(record, i18n::strings(lang), generated_at);

        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        Ok(RenderedDocument {
            filename: self.filename(record),
            bytes,
        })
    }

    /// Deterministic filename: the last ten characters of the transfer id
    /// and the transfer date with separators stripped.
    pub fn filename(&self, record: &ReceiptRecord) -> String {
        let chars: Vec<char> = record.transfer_id.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(10)..].iter().collect();
        format!(
            "{}_{}_{}.png",
            self.config.filename_prefix,
            tail,
            record.transfer_date.format("%Y%m%d")
        )
    }
}

/// A document must never be emitted with a malformed amount or a missing
/// required party field.
fn validate(record: &ReceiptRecord) -> Result<(), RenderError> {
    if !record.amount.is_finite() || record.amount < 0.0 {
        return Err(RenderError::InvalidAmount(record.amount));
    }
    if record.beneficiary.name.trim().is_empty() {
        return Err(RenderError::MissingField("beneficiary.name"));
    }
    if record.beneficiary.account_number.trim().is_empty() {
        return Err(RenderError::MissingField("beneficiary.account_number"));
    }
    if record.currency.trim().is_empty() {
        return Err(RenderError::MissingField("currency"));
    }
    Ok(())
}
