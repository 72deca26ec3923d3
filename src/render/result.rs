//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use super::markup::Markup;

/// Result of rendering a document, including markup and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered element tree
    pub markup: Markup,

    /// The element tree serialized as HTML
    pub html: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result, serializing the markup.
    pub fn new(markup: Markup, stats: RenderStats) -> Self {
        let html = markup.to_html();
        Self {
            markup,
            html,
            stats,
        }
    }

    /// Get the HTML length in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of paragraphs rendered
    pub paragraph_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of lists rendered
    pub list_count: u32,

    /// Number of list items rendered
    pub list_item_count: u32,

    /// Number of block quotes rendered
    pub quote_count: u32,

    /// Number of anchors (authored and detected)
    pub link_count: u32,

    /// Number of video embeds
    pub embed_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of nodes of unrecognized type
    pub unknown_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.quote_count += other.quote_count;
        self.link_count += other.link_count;
        self.embed_count += other.embed_count;
        self.image_count += other.image_count;
        self.table_count += other.table_count;
        self.unknown_count += other.unknown_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
