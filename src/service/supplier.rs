//! The content-supplier seam.
//!
//! Everything that turns a URL into page HTML sits behind `ContentSupplier`:
//! the pipeline never talks to the network directly, and tests swap in a
//! canned supplier. The production implementation is a browser-emulating
//! HTTP client; JavaScript rendering and retry/backoff are out of scope.

use async_trait::async_trait;
use rquest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::service::http::{create_client, ClientType};

#[async_trait]
pub trait ContentSupplier: Send + Sync {
    /// Fetch the HTML for one page. Errors are per-candidate: the caller
    /// skips and moves on.
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

pub struct HttpSupplier {
    client: Client,
    session_cookie: Option<String>,
}

impl HttpSupplier {
    /// Failing to build a client at all is the one catastrophic supplier
    /// condition; the caller ends the run with whatever it has.
    pub fn new(session_token: Option<&str>) -> Result<Self> {
        let client = create_client(ClientType::HeavyEmulation)
            .map_err(|e| AppError::SupplierUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            session_cookie: session_token.map(|t| format!("session={}", t)),
        })
    }
}

#[async_trait]
impl ContentSupplier for HttpSupplier {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let mut request = self.client.get(url.as_str());
        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", cookie.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::network(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::network(format!("{}: HTTP {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::network(format!("{}: body read failed: {}", url, e)))
    }
}
