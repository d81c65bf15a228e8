//! Compiled regex patterns for content extraction.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! Patterns are organized by the pipeline stage that consumes them.
//! Matching is unanchored (`find` semantics) and case-sensitive unless the
//! pattern itself says otherwise.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Document Cleaner Patterns
// =============================================================================

/// Matches id/class/name tokens of comments, footers, social widgets, bylines
/// and the other known boilerplate containers.
pub static BOILERPLATE_NODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "^side$|combx|retweet|menucontainer|navbar|comment|PopularQuestions|contact|foot|footer|Footer",
        "|footnote|cnn_strycaptiontxt|links|meta$|scroll|shoutbox|sponsor",
        "|tags|socialnetworking|socialNetworking|cnnStryHghLght|cnn_stryspcvbx|^inset$|pagetools",
        "|post-attributes|welcome_form|contentTools2|the_answers",
        "|communitypromo|subscribe|vcard|articleheadings|date|print|popup|author-dropdown|tools",
        "|socialtools|byline|konafilter|KonaFilter|breadcrumbs|^fn$|wp-caption-text",
    ))
    .expect("BOILERPLATE_NODES regex")
});

/// A bare `caption` id or class.
pub static CAPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^caption$").expect("CAPTION regex"));

/// A space-delimited ` google ` token.
pub static GOOGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" google ").expect("GOOGLE regex"));

/// "more" blocks that are not `entry-` prefixed.
pub static ENTRIES_MORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[^entry-]more.*$").expect("ENTRIES_MORE regex"));

/// Facebook widget markers; a leading hyphen (`-facebook`) is not a widget.
pub static FACEBOOK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^-]facebook").expect("FACEBOOK regex"));

/// Twitter widget markers; a leading hyphen (`-twitter`) is not a widget.
pub static TWITTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^-]twitter").expect("TWITTER regex"));

/// Drop-cap spans holding the oversized first letter of an article.
pub static DROP_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("dropcap|drop_cap").expect("DROP_CAP regex"));

/// Block-level tags inside a div/span's (lowercased) inner HTML.
pub static BLOCK_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("<(a|blockquote|dl|div|img|ol|p|pre|table|ul)").expect("BLOCK_ELEMENTS regex")
});

// =============================================================================
// Image Patterns
// =============================================================================

/// Image sources that are buttons, ad-network pixels or known icons.
pub static BAD_IMAGE_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\.html|\.gif|\.ico|button|twitter\.jpg|facebook\.jpg|digg\.jpg|digg\.png|delicious\.png",
        r"|facebook\.png|reddit\.jpg|doubleclick|diggthis|diggThis|adserver|/ads/|ec\.atdmt\.com",
        r"|mediaplex\.com|adsatt|view\.atdmt",
    ))
    .expect("BAD_IMAGE_NAMES regex")
});

// =============================================================================
// Text Patterns
// =============================================================================

/// Anything that is not a letter, a decimal digit, a connector or whitespace.
pub static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Ll}\p{Lu}\p{Lt}\p{Lo}\p{Nd}\p{Pc}\s]").expect("PUNCTUATION regex")
});

/// Video hosts whose embeds are kept as movie candidates.
pub static VIDEO_HOSTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("youtube|vimeo").expect("VIDEO_HOSTS regex"));

/// A single named or numeric character reference.
pub static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});").expect("HTML_ENTITY regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boilerplate_matches_common_tokens() {
        for token in ["comments", "site-footer", "byline", "breadcrumbs", "side", "fn"] {
            assert!(BOILERPLATE_NODES.is_match(token), "{token} should match");
        }
        assert!(!BOILERPLATE_NODES.is_match("article-body"));
        assert!(!BOILERPLATE_NODES.is_match("sidebar-inset"));
    }

    #[test]
    fn widget_markers_skip_hyphen_prefix() {
        assert!(FACEBOOK.is_match("share facebook"));
        assert!(!FACEBOOK.is_match("share-facebook"));
        assert!(!FACEBOOK.is_match("facebook"));
        assert!(TWITTER.is_match("xtwitter-widget"));
        assert!(!TWITTER.is_match("icon-twitter"));
    }

    #[test]
    fn caption_and_google_are_narrow() {
        assert!(CAPTION.is_match("caption"));
        assert!(!CAPTION.is_match("wp-caption"));
        assert!(GOOGLE.is_match("ad google slot"));
        assert!(!GOOGLE.is_match("google"));
    }

    #[test]
    fn block_elements_detect_nested_blocks() {
        assert!(BLOCK_ELEMENTS.is_match("text <p>para</p>"));
        assert!(BLOCK_ELEMENTS.is_match("<img src=x>"));
        assert!(!BLOCK_ELEMENTS.is_match("just <b>bold</b> text"));
    }

    #[test]
    fn bad_image_names() {
        assert!(BAD_IMAGE_NAMES.is_match("http://x.com/spacer.gif"));
        assert!(BAD_IMAGE_NAMES.is_match("http://ad.doubleclick.net/pixel.png"));
        assert!(!BAD_IMAGE_NAMES.is_match("http://x.com/photos/lead.jpg"));
    }
}
