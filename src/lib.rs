//! # cmsrender
//!
//! Render headless-CMS content to UI markup.
//!
//! This library takes the JSON a headless CMS serves for rich-text fields
//! and pages, reconciles the different page shapes into one, and renders
//! the result to an element tree, HTML, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cmsrender::{normalize_file, render};
//!
//! fn main() -> cmsrender::Result<()> {
//!     // Read and normalize a page response
//!     let page = normalize_file("about.json", "about")?;
//!
//!     // Render it to HTML
//!     let options = render::RenderOptions::default();
//!     let html = render::render_page(&page, &options).to_html();
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Total decoding**: any JSON becomes a renderable document
//! - **Video embeds**: YouTube and Vimeo links become responsive players
//! - **Link detection**: bare URLs in text and table cells become anchors
//! - **Page normalization**: globals and dynamic pages share one shape
//! - **Cleanup pipeline**: text normalization for plain-text output

pub mod collection;
pub mod detect;
pub mod error;
pub mod model;
pub mod normalize;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use collection::{active_in_order, resolve_asset_url, NavLink, Ordered, SliderImage};
pub use detect::{detect_shape, unwrap_envelope, ResponseShape};
pub use error::{Error, Result};
pub use model::{
    ContentType, DocumentNode, DynamicTableConfig, LinkRow, PageSection, PageType, RichText,
    TableCell, TableColumn, TableRow, TableVariant, UnifiedPageResponse,
};
pub use normalize::{normalize, normalize_value, RawPage};
pub use render::{
    CleanupOptions, CleanupPreset, HtmlRenderer, JsonFormat, Markup, RenderOptions, RenderResult,
};
pub use store::{ContentArea, LoadingState, LoadingStore};

use std::fs;
use std::path::Path;

use serde_json::Value;

/// Decode a rich-text field from JSON.
///
/// Accepts either the field itself (`{"root": ...}`) or an object holding
/// it under `content`, such as a page section.
///
/// # Example
///
/// ```
/// use cmsrender::parse_rich_text;
///
/// let doc = parse_rich_text(r#"{"root": {"children": []}}"#).unwrap();
/// assert!(doc.is_empty());
/// ```
pub fn parse_rich_text(json: &str) -> Result<RichText> {
    let value: Value = serde_json::from_str(json)?;
    Ok(rich_text_from_value(&value))
}

/// Pick the rich-text field out of a decoded value.
pub fn rich_text_from_value(value: &Value) -> RichText {
    match value.get("content") {
        Some(content) if value.get("root").is_none() => RichText::from_value(content),
        _ => RichText::from_value(value),
    }
}

/// Read a JSON file.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Render a rich-text JSON string to HTML.
///
/// # Example
///
/// ```
/// use cmsrender::{render_str, RenderOptions};
///
/// let html = render_str("{}", &RenderOptions::default()).unwrap();
/// assert!(html.contains("No content available"));
/// ```
pub fn render_str(json: &str, options: &RenderOptions) -> Result<String> {
    let content = parse_rich_text(json)?;
    Ok(render::to_html(&content, options))
}

/// Render a rich-text JSON file to HTML.
pub fn render_file<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let value = read_json(path)?;
    Ok(render::to_html(&rich_text_from_value(&value), options))
}

/// Normalize a page response given as a JSON string.
///
/// Only malformed JSON is an error; any JSON value normalizes.
pub fn normalize_str(json: &str, slug: &str) -> Result<UnifiedPageResponse> {
    let value: Value = serde_json::from_str(json)?;
    Ok(normalize_value(value, slug))
}

/// Normalize a page response read from a file.
pub fn normalize_file<P: AsRef<Path>>(path: P, slug: &str) -> Result<UnifiedPageResponse> {
    Ok(normalize_value(read_json(path)?, slug))
}

/// Derive a page slug from a file name: `department-info.json` gives
/// `department-info`.
pub fn slug_from_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Check a slug and return it, or fail with [`Error::InvalidSlug`].
pub fn validate_slug(slug: &str) -> Result<&str> {
    if model::is_valid_slug(slug) {
        Ok(slug)
    } else {
        Err(Error::InvalidSlug(slug.to_string()))
    }
}

/// Builder for loading and rendering CMS pages.
///
/// # Example
///
/// ```no_run
/// use cmsrender::CmsRender;
///
/// let html = CmsRender::new()
///     .with_asset_base("https://cms.example.edu")
///     .with_embeds(false)
///     .page_file("about.json")?
///     .to_html();
/// # Ok::<(), cmsrender::Error>(())
/// ```
pub struct CmsRender {
    render_options: RenderOptions,
    strict_slugs: bool,
}

impl CmsRender {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
            strict_slugs: false,
        }
    }

    /// Set the asset base URL for images.
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_asset_base(base);
        self
    }

    /// Enable or disable video embeds.
    pub fn with_embeds(mut self, embed: bool) -> Self {
        self.render_options = self.render_options.with_embeds(embed);
        self
    }

    /// Set the empty-content placeholder.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_placeholder(text);
        self
    }

    /// Set cleanup preset for text output.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Reject slugs that are not `lower-case-with-hyphens`.
    pub fn strict_slugs(mut self) -> Self {
        self.strict_slugs = true;
        self
    }

    /// Normalize a raw page response.
    pub fn page(self, value: Value, slug: &str) -> Result<PageOutput> {
        if self.strict_slugs {
            validate_slug(slug)?;
        }
        Ok(PageOutput {
            page: normalize_value(value, slug),
            render_options: self.render_options,
        })
    }

    /// Read and normalize a page file; the slug is the file stem.
    pub fn page_file<P: AsRef<Path>>(self, path: P) -> Result<PageOutput> {
        let slug = slug_from_path(&path);
        let value = read_json(path)?;
        self.page(value, &slug)
    }
}

impl Default for CmsRender {
    fn default() -> Self {
        Self::new()
    }
}

/// A normalized page ready for output.
pub struct PageOutput {
    /// The normalized page
    pub page: UnifiedPageResponse,
    /// Render options to use
    render_options: RenderOptions,
}

impl PageOutput {
    /// Render to an element tree.
    pub fn to_markup(&self) -> Markup {
        render::render_page(&self.page, &self.render_options)
    }

    /// Render to HTML.
    pub fn to_html(&self) -> String {
        self.to_markup().to_html()
    }

    /// Render with statistics.
    pub fn render_with_stats(&self) -> RenderResult {
        render::render_page_with_stats(&self.page, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::page_to_text(&self.page, &self.render_options)
    }

    /// Serialize the normalized page.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.page, format)
    }

    /// Get the page.
    pub fn page(&self) -> &UnifiedPageResponse {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_builder() {
        let builder = CmsRender::new()
            .with_asset_base("https://cms.example.edu")
            .with_embeds(false)
            .with_cleanup(CleanupPreset::Standard);

        assert_eq!(
            builder.render_options.asset_base_url.as_deref(),
            Some("https://cms.example.edu")
        );
        assert!(!builder.render_options.embed_videos);
        assert!(builder.render_options.cleanup.is_some());
    }

    #[test]
    fn test_builder_default() {
        let builder = CmsRender::default();
        assert!(builder.render_options.embed_videos);
        assert!(!builder.strict_slugs);
    }

    #[test]
    fn test_strict_slugs() {
        let result = CmsRender::new().strict_slugs().page(json!({}), "Bad Slug");
        assert!(matches!(result, Err(Error::InvalidSlug(_))));

        let output = CmsRender::new().strict_slugs().page(json!({}), "about-us").unwrap();
        assert_eq!(output.page().hero_title, "About Us");
    }

    #[test]
    fn test_render_str_invalid_json() {
        let result = render_str("{not json", &RenderOptions::default());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_rich_text_from_section() {
        let doc = rich_text_from_value(&json!({
            "title": "Intro",
            "content": {"root": {"children": [{"type": "paragraph", "children": [{"text": "Hi"}]}]}}
        }));
        assert_eq!(doc.plain_text(), "Hi");
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path("pages/Department-Info.json"), "department-info");
        assert_eq!(slug_from_path(""), "");
    }

    #[test]
    fn test_page_file() {
        let mut file = tempfile::Builder::new()
            .prefix("admissions")
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(file, r#"{{"heroTitle": "Admissions", "sections": []}}"#).unwrap();

        let output = CmsRender::new().page_file(file.path()).unwrap();
        assert_eq!(output.page().hero_title, "Admissions");
        assert!(output.to_html().contains("No Content Available"));
        assert_eq!(output.to_text(), "Admissions");
    }

    #[test]
    fn test_normalize_file_missing() {
        let result = normalize_file("/nonexistent/page.json", "page");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
