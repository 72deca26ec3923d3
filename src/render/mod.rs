//! Rendering module for turning rich text and pages into markup, HTML,
//! plain text and JSON.

mod cleanup;
mod embed;
mod html;
mod json;
mod links;
mod markup;
mod options;
mod page;
mod result;
mod table;
mod text;
pub mod visitor;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use embed::{embed_block, embed_url, is_video_url, video_id, VideoHost};
pub use html::{
    format_classes, heading_classes, placeholder, render_rich_text, to_html, to_html_with_stats,
    HtmlRenderer,
};
pub use json::{to_json, JsonFormat};
pub use links::{
    find_urls, is_pdf_link, linkify, split_urls, styled_anchor, whole_url, AnchorStyle,
    LinkPalette, TextSegment,
};
pub use markup::{to_html_fragment, Element, Markup};
pub use options::{RenderOptions, DEFAULT_PLACEHOLDER};
pub use page::{render_page, render_page_with_stats, render_section, section_anchor};
pub use result::{RenderResult, RenderStats};
pub use table::{render_dynamic_table, render_link_table};
pub use text::{page_to_text, to_text};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, MaxHeadingDepthVisitor, NodeVisitor, SkipImagesVisitor,
    VisitorAction,
};
