//! Shared fixtures: an in-memory fetcher and a synthetic article page.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rs_goose::fetch::{ContentInfo, FetchedImage, Fetcher};
use rs_goose::{Configuration, ContentExtractor, Error, Result};

pub const PAGE_URL: &str = "https://example.com/news/owls";

pub const PARAGRAPHS: [&str; 3] = [
    "Owls have returned to the valley after an absence of more than ten years, and the local bird club says that it is the best news they have had in a long time.",
    "The birds were first seen by a farmer who was out in his fields at dawn, and he said that there were at least four of them sitting on the old barn.",
    "Experts from the university have asked people to keep their distance so that the owls can settle in, and they will be counting the nests over the spring.",
];

pub const FOOTER_TEXT: &str = "Copyright of the site and all of the rights to the content are reserved by the owners of it.";

/// A served image: declared size plus decoded dimensions.
#[derive(Debug, Clone)]
pub struct FakeImage {
    pub declared_size: Option<u64>,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

impl FakeImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            declared_size: Some(50_000),
            width,
            height,
            bytes: 6_000,
        }
    }
}

/// In-memory [`Fetcher`] that records every image download.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    images: HashMap<String, FakeImage>,
    downloads: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn image(mut self, url: &str, image: FakeImage) -> Self {
        self.images.insert(url.to_string(), image);
        self
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }

    fn content_info(&self, url: &str) -> Result<ContentInfo> {
        let image = self
            .images
            .get(url)
            .ok_or_else(|| Error::Fetch(format!("no such image: {url}")))?;
        let size = image
            .declared_size
            .ok_or_else(|| Error::Fetch(format!("HEAD not allowed: {url}")))?;
        Ok(ContentInfo {
            url: url.to_string(),
            mime_type: "image/jpeg".to_string(),
            size,
        })
    }

    fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
        if let Ok(mut downloads) = self.downloads.lock() {
            downloads.push(url.to_string());
        }
        let image = self
            .images
            .get(url)
            .ok_or_else(|| Error::HttpStatus {
                url: url.to_string(),
                status: 404,
            })?;
        Ok(FetchedImage {
            bytes: vec![0xFF; image.bytes],
            width: image.width,
            height: image.height,
            mime_type: "image/jpeg".to_string(),
        })
    }
}

/// Article page with a pipe-delimited title, three paragraphs, a footer and
/// an `og:image`. `body_extra` is appended inside the article container.
pub fn article_page(body_extra: &str) -> String {
    let paragraphs: String = PARAGRAPHS.iter().map(|p| format!("<p>{p}</p>\n")).collect();
    format!(
        r#"<html>
<head>
  <title>Owls return to the valley | Example News</title>
  <meta name="description" content="Owls are back.">
  <meta name="keywords" content="owls, valley">
  <meta property="og:image" content="/images/og.jpg">
</head>
<body>
  <div class="article">
{paragraphs}{body_extra}
  </div>
  <div id="footer"><p>{FOOTER_TEXT}</p></div>
</body>
</html>"#
    )
}

pub fn config(cache_directory: &Path) -> Configuration {
    Configuration {
        cache_directory: cache_directory.to_path_buf(),
        ..Configuration::default()
    }
}

pub fn extractor(config: Configuration, fetcher: &Arc<FakeFetcher>) -> ContentExtractor {
    ContentExtractor::with_fetcher(config, Arc::clone(fetcher) as Arc<dyn Fetcher>)
}
