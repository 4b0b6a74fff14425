//! Extraction request parameters.

use crate::error::{Error, Result};
use serde::Serialize;

/// Highest confidence threshold the service accepts.
pub const MAX_CONFIDENCE: u8 = 99;

/// Parameters for extracting tables from an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseRequest {
    /// URL of the document to download
    pub url: String,

    /// Detect rows without explicit separators
    pub implicit_rows: bool,

    /// Detect columns without explicit separators
    pub implicit_columns: bool,

    /// Detect tables without borders
    pub borderless_tables: bool,

    /// Minimum OCR confidence (0-99)
    pub min_confidence: u8,

    /// Correct page rotation before detection
    pub detect_rotation: bool,
}

impl BaseRequest {
    /// Create a request for the given document URL with service defaults.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            implicit_rows: false,
            implicit_columns: false,
            borderless_tables: false,
            min_confidence: 50,
            detect_rotation: false,
        }
    }

    /// Enable or disable implicit row detection.
    pub fn with_implicit_rows(mut self, enabled: bool) -> Self {
        self.implicit_rows = enabled;
        self
    }

    /// Enable or disable implicit column detection.
    pub fn with_implicit_columns(mut self, enabled: bool) -> Self {
        self.implicit_columns = enabled;
        self
    }

    /// Enable or disable borderless table detection.
    pub fn with_borderless_tables(mut self, enabled: bool) -> Self {
        self.borderless_tables = enabled;
        self
    }

    /// Set minimum OCR confidence.
    pub fn with_min_confidence(mut self, confidence: u8) -> Self {
        self.min_confidence = confidence;
        self
    }

    /// Enable or disable rotation detection.
    pub fn with_detect_rotation(mut self, enabled: bool) -> Self {
        self.detect_rotation = enabled;
        self
    }

    /// Check the parameters before sending them.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::InvalidRequest("url must not be empty".to_string()));
        }
        if self.min_confidence > MAX_CONFIDENCE {
            return Err(Error::InvalidRequest(format!(
                "min_confidence must be at most {} (got {})",
                MAX_CONFIDENCE, self.min_confidence
            )));
        }
        Ok(())
    }
}

/// Parameters for extracting tables from a PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfRequest {
    /// Shared extraction parameters
    #[serde(flatten)]
    pub base: BaseRequest,

    /// Pages to process (all pages if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<u32>>,

    /// Use the PDF's embedded text instead of OCR where possible
    pub pdf_text_extraction: bool,
}

impl PdfRequest {
    /// Create a request for the given PDF URL with service defaults.
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_base(BaseRequest::new(url))
    }

    /// Wrap existing image parameters.
    pub fn from_base(base: BaseRequest) -> Self {
        Self {
            base,
            pages: None,
            pdf_text_extraction: true,
        }
    }

    /// Restrict extraction to the given pages.
    pub fn with_pages(mut self, pages: impl IntoIterator<Item = u32>) -> Self {
        self.pages = Some(pages.into_iter().collect());
        self
    }

    /// Enable or disable embedded text extraction.
    pub fn with_text_extraction(mut self, enabled: bool) -> Self {
        self.pdf_text_extraction = enabled;
        self
    }

    /// Check the parameters before sending them.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }
}
