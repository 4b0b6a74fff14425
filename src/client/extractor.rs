//! Blocking HTTP client for the table extraction service.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ExtractedTable, PdfExtractedTable};
use crate::parser::{LinkOptions, TableLinker};
use crate::response::{PdfTableResponse, TableResponse};

use super::validation::{describe_server_error, describe_validation_error};
use super::{BaseRequest, PdfRequest};

/// Client bound to one extraction server.
///
/// ```no_run
/// use latent_grid::client::{BaseRequest, TableExtractor};
/// use latent_grid::TableAccess;
///
/// let extractor = TableExtractor::new("http://localhost:8000")?;
/// let tables = extractor.process_image(&BaseRequest::new("https://example.com/scan.png"))?;
/// for table in &tables {
///     println!("{:?}: {} cells", table.title(), table.cell_count());
/// }
/// # Ok::<(), latent_grid::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableExtractor {
    url: String,
    http: Client,
    linker: TableLinker,
}

#[derive(Deserialize)]
struct HealthStatus {
    status: String,
}

impl TableExtractor {
    /// Create a client for the server at `url`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(url, http))
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
            linker: TableLinker::new(),
        }
    }

    /// Set the options used to link responses.
    pub fn with_link_options(mut self, options: LinkOptions) -> Self {
        self.linker = TableLinker::with_options(options);
        self
    }

    /// Server base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check whether the server reports itself healthy.
    pub fn health(&self) -> Result<bool> {
        let response = self.http.get(self.endpoint("health")).send()?;
        let body = check_response(response)?.text()?;
        let status: HealthStatus = serde_json::from_str(&body)?;
        Ok(status.status == "ok")
    }

    /// Extract tables from an image.
    pub fn process_image(&self, request: &BaseRequest) -> Result<Vec<ExtractedTable>> {
        request.validate()?;
        let responses: Vec<TableResponse> = self.post("image", request)?;
        self.linker.link_all(&responses)
    }

    /// Extract tables from a PDF.
    pub fn process_pdf(&self, request: &PdfRequest) -> Result<Vec<PdfExtractedTable>> {
        request.validate()?;
        let responses: Vec<PdfTableResponse> = self.post("pdf", request)?;
        self.linker.link_all_pdf(&responses)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let endpoint = self.endpoint(path);
        log::debug!("TableExtractor: POST {}", endpoint);

        let response = self.http.post(&endpoint).json(body).send()?;
        let text = check_response(response)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), path)
    }
}

/// Turn non-success responses into errors.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    log::warn!("TableExtractor: server answered {}", status);

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(Error::Validation(describe_validation_error(&body)));
    }

    let message = describe_server_error(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default();
    Err(Error::Server {
        status: status.as_u16(),
        message,
    })
}
