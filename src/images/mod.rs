//! Lead image selection.

mod guesser;
mod store;

pub use guesser::{is_banner_dimensions, BestImageGuesser};
pub use store::{store_temp_image, TempImageGuard};

use dom_query::{Document, NodeId};

use crate::result::Image;

/// Picks the lead image of a document given its top node.
///
/// Never fails: when nothing is found an [`Image`] without a source is returned.
pub trait ImageExtractor {
    fn best_image(&mut self, doc: &Document, top: NodeId) -> Image;
}
