//! Configuration for content extraction.
//!
//! `Configuration` is built once by the caller and shared read-only by every
//! stage of an extraction. Pluggable strategies (publish date, additional
//! data) are trait objects behind `Arc` so one configuration can serve many
//! concurrent extractions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dom_query::Document;

use crate::text::StopWords;

/// A strategy that derives a value from the raw, uncleaned document.
///
/// Any `Fn(&Document) -> T` closure is an extractor:
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use rs_goose::{AdditionalDataExtractor, Configuration};
///
/// let section: Arc<AdditionalDataExtractor> = Arc::new(|doc: &dom_query::Document| {
///     let mut data = HashMap::new();
///     let section = doc.select("meta[name=section]").attr("content");
///     if let Some(section) = section {
///         data.insert("section".to_string(), section.to_string());
///     }
///     data
/// });
///
/// let config = Configuration {
///     additional_data_extractor: section,
///     ..Configuration::default()
/// };
/// # let _ = config;
/// ```
pub trait Extractor<T>: Send + Sync {
    fn extract(&self, document: &Document) -> T;
}

impl<T, F> Extractor<T> for F
where
    F: Fn(&Document) -> T + Send + Sync,
{
    fn extract(&self, document: &Document) -> T {
        self(document)
    }
}

/// Extracts the article's publish date.
pub type PublishDateExtractor = dyn Extractor<Option<DateTime<Utc>>>;

/// Extracts arbitrary key/value data stored on `Article::additional_data`.
pub type AdditionalDataExtractor = dyn Extractor<HashMap<String, String>>;

/// Network limits and identity used by [`crate::fetch::HttpFetcher`].
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Default: a desktop browser user agent.
    pub user_agent: String,

    /// Default: 15 seconds.
    pub connect_timeout: Duration,

    /// Timeout for reading a whole response.
    ///
    /// Default: 10 seconds.
    pub read_timeout: Duration,

    /// Pages larger than this are rejected.
    ///
    /// Default: 15 MiB
    pub max_page_bytes: u64,

    /// Images larger than this are never downloaded or scored.
    ///
    /// Default: 10 MiB
    pub max_image_bytes: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0 Safari/537.36"
                .to_string(),
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(10),
            max_page_bytes: 15 * 1024 * 1024,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Per-extraction settings.
///
/// # Example
///
/// ```rust
/// use rs_goose::Configuration;
///
/// let config = Configuration {
///     enable_image_fetching: false,
///     min_bytes_for_images: 10_000,
///     ..Configuration::default()
/// };
/// assert!(!config.enable_image_fetching);
/// ```
#[derive(Clone)]
pub struct Configuration {
    /// Directory for temporary image files written while scoring candidates.
    ///
    /// Default: `<system temp dir>/rs-goose`
    pub cache_directory: PathBuf,

    /// Images smaller than this many bytes are ignored.
    ///
    /// Default: `4500`
    pub min_bytes_for_images: u64,

    /// Download and measure candidate images to pick a lead image.
    ///
    /// Default: `true`
    pub enable_image_fetching: bool,

    /// Runs on the raw document before cleaning.
    ///
    /// Default: always `None`
    pub publish_date_extractor: Arc<PublishDateExtractor>,

    /// Runs on the raw document before cleaning.
    ///
    /// Default: always empty
    pub additional_data_extractor: Arc<AdditionalDataExtractor>,

    /// Stop-word list used for every density computation.
    ///
    /// Default: English
    pub stop_words: Arc<StopWords>,

    pub http: HttpSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            cache_directory: std::env::temp_dir().join("rs-goose"),
            min_bytes_for_images: 4500,
            enable_image_fetching: true,
            publish_date_extractor: Arc::new(|_: &Document| -> Option<DateTime<Utc>> { None }),
            additional_data_extractor: Arc::new(|_: &Document| HashMap::<String, String>::new()),
            stop_words: Arc::new(StopWords::english()),
            http: HttpSettings::default(),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("cache_directory", &self.cache_directory)
            .field("min_bytes_for_images", &self.min_bytes_for_images)
            .field("enable_image_fetching", &self.enable_image_fetching)
            .field("stop_words", &self.stop_words.language())
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}
