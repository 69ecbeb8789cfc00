use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::TryStreamExt;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, Url};

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// The AndroidX release-notes Atom feed.
pub const DEFAULT_FEED_URL: &str = "https://developer.android.com/feeds/androidx-release-notes.xml";

const ACCEPT_FEED: &str = "application/atom+xml, application/xml;q=0.9, */*;q=0.5";

/// Transport limits for one feed download.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Safety cap on the body; larger responses are rejected, not truncated.
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: ["application/atom+xml", "application/xml", "text/xml"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl FetchSettings {
    /// Compares the media type only; parameters such as `charset` are ignored.
    fn accepts(&self, content_type: &str) -> bool {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    }

    fn check_size(&self, actual: u64) -> Result<(), FetchError> {
        if actual <= self.max_bytes {
            return Ok(());
        }
        Err(FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        ))
    }
}

#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// Downloads the feed over HTTPS with the limits in [`FetchSettings`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// A client per request so the redirect count belongs to that request.
    fn client(&self, redirects: Arc<AtomicUsize>) -> Result<Client, FetchError> {
        let limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let followed = attempt.previous().len();
            redirects.store(followed, Ordering::Relaxed);
            if followed < limit {
                attempt.follow()
            } else {
                attempt.error("redirect limit exceeded")
            }
        });

        Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(FetchError::from)
    }

    /// Rejects a response on its status line and headers, before the body is read.
    fn screen(&self, response: &Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        if let Some(declared) = response.content_length() {
            self.settings.check_size(declared)?;
        }

        let content_type = header_text(response.headers());
        match content_type.as_deref() {
            Some(value) if !self.settings.accepts(value) => Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: value.to_string(),
                },
                "unsupported content type",
            )),
            _ => Ok(content_type),
        }
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.try_next().await.map_err(FetchError::from)? {
            self.settings
                .check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl FeedFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let redirects = Arc::new(AtomicUsize::new(0));

        let response = self
            .client(Arc::clone(&redirects))?
            .get(target)
            .header(ACCEPT, ACCEPT_FEED)
            .send()
            .await
            .map_err(FetchError::from)?;

        let content_type = self.screen(&response)?;
        let final_url = response.url().to_string();
        let bytes = self.read_body(response).await?;
        engine_debug!("feed body {} bytes from {}", bytes.len(), final_url);

        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                redirect_count: redirects.load(Ordering::Relaxed),
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

fn header_text(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
