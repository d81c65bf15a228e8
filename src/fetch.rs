//! Network collaborator.
//!
//! Extraction only needs three things from the network: a page's HTML, a
//! cheap size/type check for candidate images, and the bytes of images worth
//! measuring. [`Fetcher`] is the seam; [`HttpFetcher`] implements it with a
//! blocking reqwest client, and tests plug in an in-memory fake.

use std::io::Read;

use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::config::HttpSettings;
use crate::encoding;
use crate::error::{Error, Result};

/// Accept header sent with page requests.
const ACCEPT: &str = "application/xml,application/xhtml+xml,text/html;q=0.9,text/plain;q=0.8,image/png,*/*;q=0.5";

/// Content types accepted as pages.
const HTML_TYPES: &[&str] = &["text/html", "text/xml", "application/xml"];

/// Result of a HEAD-style request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentInfo {
    /// Final URL after redirects.
    pub url: String,
    pub mime_type: String,
    /// Declared length in bytes, 0 when the server did not say.
    pub size: u64,
}

/// A downloaded image and its decoded pixel dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
}

/// Everything extraction needs from the network.
pub trait Fetcher: Send + Sync {
    /// GET a page, following redirects, and return its body as UTF-8.
    fn fetch_html(&self, url: &str) -> Result<String>;

    /// Size and content type without downloading the body.
    fn content_info(&self, url: &str) -> Result<ContentInfo>;

    /// Download an image and measure it.
    fn fetch_image(&self, url: &str) -> Result<FetchedImage>;
}

/// Mime type and dimensions of image bytes.
pub fn measure_image(bytes: &[u8]) -> Result<(u32, u32, String)> {
    let size = imagesize::blob_size(bytes).map_err(|e| Error::Image(e.to_string()))?;
    let mime = match imagesize::image_type(bytes) {
        Ok(imagesize::ImageType::Gif) => "image/gif",
        Ok(imagesize::ImageType::Jpeg) => "image/jpeg",
        Ok(imagesize::ImageType::Png) => "image/png",
        Ok(imagesize::ImageType::Webp) => "image/webp",
        Ok(_) => "image/other",
        Err(e) => return Err(Error::Image(e.to_string())),
    };
    let width = u32::try_from(size.width).map_err(|e| Error::Image(e.to_string()))?;
    let height = u32::try_from(size.height).map_err(|e| Error::Image(e.to_string()))?;
    Ok((width, height, mime.to_string()))
}

/// [`Fetcher`] over a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    settings: HttpSettings,
}

impl HttpFetcher {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.read_timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| Error::Fetch(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    fn get(&self, url: &str, accept: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .header(reqwest::header::CACHE_CONTROL, "max-age=0")
            .send()
            .map_err(|e| Error::Fetch(format!("failed to fetch {url}: {e}")))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    /// Read at most `limit` bytes of a body, failing when it is longer.
    fn read_capped(response: Response, url: &str, limit: u64) -> Result<Vec<u8>> {
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(Error::MaxBytes {
                url: url.to_string(),
                limit,
            });
        }
        let mut body = Vec::new();
        response.take(limit + 1).read_to_end(&mut body)?;
        if body.len() as u64 > limit {
            return Err(Error::MaxBytes {
                url: url.to_string(),
                limit,
            });
        }
        Ok(body)
    }
}

fn header_str(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

impl Fetcher for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.get(url, ACCEPT)?;
        let content_type = header_str(&response, CONTENT_TYPE).unwrap_or_default();
        let body = Self::read_capped(response, url, self.settings.max_page_bytes)?;

        if body.is_empty() || !HTML_TYPES.iter().any(|t| content_type.contains(t)) {
            return Err(Error::NotHtml(url.to_string()));
        }

        debug!(url, bytes = body.len(), content_type = %content_type, "fetched page");
        Ok(encoding::transcode_to_utf8(&body, Some(&content_type)))
    }

    fn content_info(&self, url: &str) -> Result<ContentInfo> {
        let response = self
            .client
            .head(url)
            .send()
            .map_err(|e| Error::Fetch(format!("failed to check {url}: {e}")))?;

        let size = header_str(&response, CONTENT_LENGTH)
            .and_then(|len| len.trim().parse().ok())
            .unwrap_or(0);
        Ok(ContentInfo {
            url: response.url().to_string(),
            mime_type: header_str(&response, CONTENT_TYPE).unwrap_or_default(),
            size,
        })
    }

    fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
        let response = self.get(url, "image/*,*/*;q=0.5")?;
        let bytes = Self::read_capped(response, url, self.settings.max_image_bytes)?;
        let (width, height, mime_type) = measure_image(&bytes)?;

        debug!(url, width, height, bytes = bytes.len(), "downloaded image");
        Ok(FetchedImage {
            bytes,
            width,
            height,
            mime_type,
        })
    }
}
