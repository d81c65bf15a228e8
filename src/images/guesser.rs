//! Best-Image Guesser
//!
//! Finds the article's lead image in three tiers, stopping at the first hit:
//! known site containers, the largest real image near the top node (found by
//! downloading and measuring candidates), then `image_src`/`og:image` meta
//! tags.

use std::collections::HashSet;

use dom_query::{Document, NodeId, NodeRef};
use tracing::{debug, warn};
use url::Url;

use crate::config::Configuration;
use crate::dom;
use crate::fetch::Fetcher;
use crate::images::store::store_temp_image;
use crate::images::ImageExtractor;
use crate::patterns::BAD_IMAGE_NAMES;
use crate::result::{Image, ImageExtractionType};
use crate::url_utils::build_image_path;

/// Ids/classes that wrap the lead image on specific publishers.
const KNOWN_IDS: &[&str] = &["yn-story-related-media", "cnn_strylccimg300cntr", "big_photo"];

/// At most this many images are size-checked or downloaded per level.
const MAX_CANDIDATES: usize = 30;
/// Images above this size are never considered.
const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
/// How many parent hops the large-image search may climb.
const MAX_PARENT_DEPTH: u32 = 2;
const MIN_WIDTH: u32 = 50;
/// Minimum width once the search has climbed past the first parent.
const MIN_WIDTH_DEEP: u32 = 300;
const BANNER_RATIO: f32 = 5.0;

/// Whether the dimensions look like an ad banner or skyscraper.
///
/// Square images are never banners.
#[must_use]
pub fn is_banner_dimensions(width: u32, height: u32) -> bool {
    if width == height {
        return false;
    }
    if width > height && width as f32 / height as f32 > BANNER_RATIO {
        return true;
    }
    height > width && height as f32 / width as f32 > BANNER_RATIO
}

/// One measured, surviving image.
struct ScoredImage<'a> {
    node: NodeRef<'a>,
    src: String,
    score: f32,
    bytes: u64,
}

/// Downloads candidate images to find the best lead image.
pub struct BestImageGuesser<'a> {
    config: &'a Configuration,
    fetcher: &'a dyn Fetcher,
    page_url: Url,
    link_hash: String,
    rejected: HashSet<NodeId>,
    candidate_urls: Vec<String>,
}

impl<'a> BestImageGuesser<'a> {
    #[must_use]
    pub fn new(config: &'a Configuration, fetcher: &'a dyn Fetcher, page_url: Url, link_hash: &str) -> Self {
        Self {
            config,
            fetcher,
            page_url,
            link_hash: link_hash.to_string(),
            rejected: HashSet::new(),
            candidate_urls: Vec::new(),
        }
    }

    /// Absolute URLs of the images scored at the level that produced a winner.
    #[must_use]
    pub fn candidate_urls(&self) -> &[String] {
        &self.candidate_urls
    }

    fn image_path(&self, src: &str) -> String {
        build_image_path(&self.page_url, src)
    }

    /// Declared size of an image, `None` when the HEAD request fails or the
    /// response is not an image.
    fn declared_bytes(&self, src: &str) -> Option<u64> {
        match self.fetcher.content_info(&self.image_path(src)) {
            Ok(info) if info.mime_type.contains("image") => Some(info.size),
            Ok(_) => None,
            Err(e) => {
                debug!(src, error = %e, "image size check failed");
                None
            }
        }
    }

    fn check_for_known_elements(&self, doc: &Document) -> Option<Image> {
        let image = KNOWN_IDS.iter().find_map(|name| {
            let container = dom::select_all(doc, &format!("[id=\"{name}\"]"))
                .into_iter()
                .next()
                .or_else(|| dom::select_all(doc, &format!(".{name}")).into_iter().next())?;
            dom::select(&container, "img")
                .into_iter()
                .find(|img| dom::attr(img, "src").is_some_and(|s| !s.trim().is_empty()))
        })?;

        let src = dom::attr_or_empty(&image, "src");
        Some(Image {
            image_src: Some(self.image_path(&src)),
            image_extraction_type: ImageExtractionType::Known,
            confidence_score: 90,
            bytes: self.declared_bytes(&src).unwrap_or(0),
            top_image_node: Some(image.id),
        })
    }

    /// Search the top node, then previous siblings, then parents (at most two
    /// hops) for the largest usable image.
    fn check_for_large_images(&mut self, top: NodeRef) -> Option<Image> {
        let mut node = Some(top);
        let mut parent_depth = 0;
        let mut sibling_depth = 0;

        while let Some(current) = node {
            if let Some(image) = self.best_image_at(&current, parent_depth) {
                debug!(parent_depth, sibling_depth, "found large image");
                return Some(image);
            }
            if parent_depth >= MAX_PARENT_DEPTH {
                break;
            }
            if let Some(previous) = dom::previous_element_sibling(&current) {
                sibling_depth += 1;
                node = Some(previous);
            } else {
                parent_depth += 1;
                node = dom::parent_element(&current);
            }
        }
        None
    }

    fn best_image_at(&mut self, node: &NodeRef, depth: u32) -> Option<Image> {
        let mut images = dom::select(node, "img");
        if dom::is_tag(node, "img") {
            images.insert(0, *node);
        }
        images.retain(|img| !self.rejected.contains(&img.id));

        let good_names = self.filter_bad_names(images);
        let sized = self.filter_by_byte_size(good_names);
        let results = self.download_and_score(sized, depth);

        let mut winner: Option<&ScoredImage> = None;
        for result in &results {
            match winner {
                Some(best) if result.score <= best.score => {}
                _ => winner = Some(result),
            }
        }
        let winner = winner?;

        self.candidate_urls = results.iter().map(|r| r.src.clone()).collect();
        Some(Image {
            image_src: Some(winner.src.clone()),
            image_extraction_type: ImageExtractionType::BigImage,
            confidence_score: (100 / results.len()) as u8,
            bytes: winner.bytes,
            top_image_node: Some(winner.node.id),
        })
    }

    fn filter_bad_names<'n>(&mut self, images: Vec<NodeRef<'n>>) -> Vec<NodeRef<'n>> {
        let mut good = Vec::new();
        for image in images {
            let src = dom::attr_or_empty(&image, "src");
            if src.trim().is_empty() || BAD_IMAGE_NAMES.is_match(&src) {
                self.rejected.insert(image.id);
            } else {
                good.push(image);
            }
        }
        good
    }

    /// Unknown sizes pass; known sizes must be above the configured minimum
    /// and below 10 MiB.
    fn filter_by_byte_size<'n>(&mut self, images: Vec<NodeRef<'n>>) -> Vec<NodeRef<'n>> {
        let min_bytes = self.config.min_bytes_for_images;
        let mut good = Vec::new();
        for image in images.into_iter().take(MAX_CANDIDATES) {
            let src = dom::attr_or_empty(&image, "src");
            let passes = match self.declared_bytes(&src) {
                None | Some(0) => true,
                Some(bytes) => bytes > min_bytes && bytes < MAX_IMAGE_BYTES,
            };
            if passes {
                good.push(image);
            } else {
                self.rejected.insert(image.id);
            }
        }
        good
    }

    /// Score images by position and area relative to the first survivor:
    /// `(1 / position) * (area / first_area)`, the first survivor scoring 1.
    fn download_and_score<'n>(&mut self, images: Vec<NodeRef<'n>>, depth: u32) -> Vec<ScoredImage<'n>> {
        let mut results = Vec::new();
        let mut position = 1usize;
        let mut initial_area = 0u64;

        for image in images {
            if position > MAX_CANDIDATES {
                break;
            }
            let src = self.image_path(&dom::attr_or_empty(&image, "src"));
            let fetched = match self.fetcher.fetch_image(&src) {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(src = %src, error = %e, "skipping image candidate");
                    continue;
                }
            };
            let stored = match store_temp_image(
                &self.config.cache_directory,
                &self.link_hash,
                &fetched,
                self.config.min_bytes_for_images,
            ) {
                Ok(Some(path)) => path,
                Ok(None) => continue,
                Err(e) => {
                    warn!(src = %src, error = %e, "could not store image candidate");
                    continue;
                }
            };

            let (width, height) = (fetched.width, fetched.height);
            if depth > 1 && width < MIN_WIDTH_DEEP {
                continue;
            }
            if is_banner_dimensions(width, height) || width < MIN_WIDTH {
                self.rejected.insert(image.id);
                continue;
            }

            let area = u64::from(width) * u64::from(height);
            let score = if initial_area == 0 {
                initial_area = area;
                1.0
            } else {
                (1.0 / position as f32) * (area as f32 / initial_area as f32)
            };
            position += 1;

            let bytes = std::fs::metadata(&stored).map_or(fetched.bytes.len() as u64, |m| m.len());
            results.push(ScoredImage {
                node: image,
                src,
                score,
                bytes,
            });
        }
        debug!(scored = results.len(), depth, "measured image candidates");
        results
    }

    fn check_for_meta_tag(&self, doc: &Document) -> Option<Image> {
        self.check_for_link_tag(doc)
            .or_else(|| self.check_for_open_graph_tag(doc))
    }

    fn meta_image(&self, src: &str, kind: ImageExtractionType) -> Option<Image> {
        if src.trim().is_empty() {
            return None;
        }
        let image_src = self.image_path(src);
        Some(Image {
            bytes: self.declared_bytes(src).unwrap_or(0),
            image_src: Some(image_src),
            image_extraction_type: kind,
            confidence_score: 100,
            top_image_node: None,
        })
    }

    fn check_for_link_tag(&self, doc: &Document) -> Option<Image> {
        let link = dom::select_all(doc, r#"link[rel*="image_src"]"#).into_iter().next()?;
        self.meta_image(&dom::attr_or_empty(&link, "href"), ImageExtractionType::LinkTag)
    }

    fn check_for_open_graph_tag(&self, doc: &Document) -> Option<Image> {
        let meta = dom::select_all(doc, r#"meta[property*="og:image"]"#).into_iter().next()?;
        self.meta_image(&dom::attr_or_empty(&meta, "content"), ImageExtractionType::OpenGraph)
    }
}

impl ImageExtractor for BestImageGuesser<'_> {
    fn best_image(&mut self, doc: &Document, top: NodeId) -> Image {
        if let Some(image) = self.check_for_known_elements(doc) {
            return image;
        }
        let top = NodeRef::new(top, &doc.tree);
        if let Some(image) = self.check_for_large_images(top) {
            return image;
        }
        self.check_for_meta_tag(doc).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_dimensions() {
        assert!(is_banner_dimensions(600, 50));
        assert!(is_banner_dimensions(50, 600));
        assert!(!is_banner_dimensions(600, 400));
        assert!(!is_banner_dimensions(500, 100));
        assert!(!is_banner_dimensions(10_000, 10_000));
    }
}
