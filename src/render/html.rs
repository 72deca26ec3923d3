//! Rich-text rendering to the UI element tree and HTML.

use log::debug;

use crate::collection::resolve_asset_url;
use crate::model::{DocumentNode, HeadingTag, ListType, RichText, TextFormat, UploadValue};

use super::embed::{embed_block, is_video_url};
use super::links::{
    external_anchor, find_urls, split_urls, styled_anchor, AnchorStyle, LinkPalette, TextSegment,
};
use super::markup::{Element, Markup};
use super::visitor::{DefaultVisitor, NodeVisitor, VisitorAction};
use super::{RenderOptions, RenderResult, RenderStats};

const PARAGRAPH_CLASS: &str = "mb-4 text-gray-700 leading-relaxed";
const PLACEHOLDER_CLASS: &str = "text-gray-500 italic";
const LIST_ITEM_CLASS: &str = "text-gray-700";
const QUOTE_CLASS: &str =
    "border-l-4 border-purple-300 pl-4 py-2 mb-4 italic text-gray-600 bg-purple-50";
const UNKNOWN_CLASS: &str = "mb-2 text-gray-700";
const IMAGE_CLASS: &str = "rounded-lg object-cover w-full h-auto min-h-[300px] max-h-[600px]";

const DEFAULT_IMAGE_ALT: &str = "Content Image";
pub(crate) const DEFAULT_IMAGE_WIDTH: u32 = 800;
pub(crate) const DEFAULT_IMAGE_HEIGHT: u32 = 400;
const DEFAULT_LINK_TEXT: &str = "Link";

/// Render rich text to an element tree.
pub fn render_rich_text(content: &RichText, options: &RenderOptions) -> Markup {
    HtmlRenderer::new(options.clone()).render(content)
}

/// Render rich text to an HTML string.
pub fn to_html(content: &RichText, options: &RenderOptions) -> String {
    render_rich_text(content, options).to_html()
}

/// Render rich text with statistics.
pub fn to_html_with_stats(content: &RichText, options: &RenderOptions) -> RenderResult {
    HtmlRenderer::new(options.clone()).render_with_stats(content)
}

/// Classes of a heading, decreasing in emphasis with depth.
pub fn heading_classes(tag: HeadingTag) -> &'static str {
    match tag {
        HeadingTag::H1 => "text-3xl font-bold mb-4 text-purple-900",
        HeadingTag::H2 => "text-2xl font-semibold mb-3 text-purple-900",
        HeadingTag::H3 => "text-xl font-semibold mb-3 text-purple-900",
        HeadingTag::H4 => "text-lg font-semibold mb-2 text-purple-900",
        HeadingTag::H5 => "text-base font-semibold mb-2 text-purple-900",
        HeadingTag::H6 => "text-sm font-semibold mb-2 text-purple-900",
    }
}

/// Classes for a text run's format flags.
pub fn format_classes(format: TextFormat) -> String {
    let mut classes = Vec::new();
    if format.is_bold() {
        classes.push("font-bold");
    }
    if format.is_italic() {
        classes.push("italic");
    }
    if format.is_underline() {
        classes.push("underline");
    }
    classes.join(" ")
}

/// The empty-content placeholder paragraph.
pub fn placeholder(text: &str) -> Markup {
    Element::new("p").class(PLACEHOLDER_CLASS).text(text).into()
}

/// A piece of an embed paragraph.
enum Piece {
    Inline(Markup),
    Embed(Markup),
}

/// Rich-text renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    visitor: Box<dyn NodeVisitor>,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: Box::new(DefaultVisitor),
            stats: RenderStats::new(),
        }
    }

    /// Set the node visitor.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Box::new(visitor);
        self
    }

    /// Render rich text to an element tree.
    pub fn render(mut self, content: &RichText) -> Markup {
        self.render_rich_text(content)
    }

    /// Render rich text with statistics.
    pub fn render_with_stats(mut self, content: &RichText) -> RenderResult {
        self.options.collect_stats = true;
        let markup = self.render_rich_text(content);
        self.finish(markup)
    }

    /// Render options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub(crate) fn finish(self, markup: Markup) -> RenderResult {
        RenderResult::new(markup, self.stats)
    }

    pub(crate) fn count(&mut self, update: impl FnOnce(&mut RenderStats)) {
        if self.options.collect_stats {
            update(&mut self.stats);
        }
    }

    /// Render one rich-text value.
    ///
    /// Absent root or children yields the placeholder; otherwise a
    /// `prose` container with each child rendered as a block, in order.
    pub fn render_rich_text(&mut self, content: &RichText) -> Markup {
        let Some(children) = content.children() else {
            return placeholder(&self.options.placeholder_text);
        };

        let blocks = children.iter().filter_map(|node| self.render_block(node));
        let blocks: Vec<Markup> = blocks.collect();
        Element::new("div")
            .class("prose max-w-none")
            .children(blocks)
            .into()
    }

    fn render_block(&mut self, node: &DocumentNode) -> Option<Markup> {
        match node {
            DocumentNode::Paragraph { children } => Some(self.render_paragraph(children)),
            DocumentNode::Heading { tag, children } => self.render_heading(*tag, children),
            DocumentNode::List {
                list_type,
                children,
            } => Some(self.render_list(*list_type, children)),
            DocumentNode::ListItem { checked, children } => {
                Some(self.render_list_item(children, None, *checked))
            }
            DocumentNode::Quote { children } => {
                let text: String = children.iter().map(DocumentNode::plain_text).collect();
                self.count(|s| {
                    s.quote_count += 1;
                    s.count_text(&text);
                });
                Some(Element::new("blockquote").class(QUOTE_CLASS).text(text).into())
            }
            DocumentNode::Upload { value } => self.render_upload(value),
            DocumentNode::Link { url, children, .. } => {
                let text = link_text(children);
                if self.options.embed_videos && is_video_url(url) {
                    if let Some(embed) = self.render_embed(url, &text) {
                        return embed;
                    }
                }
                self.render_link(url, &text)
            }
            DocumentNode::LineBreak => Some(Element::new("br").into()),
            DocumentNode::Root { children } => {
                let blocks: Vec<Markup> = children
                    .iter()
                    .filter_map(|child| self.render_block(child))
                    .collect();
                Some(Element::new("div").children(blocks).into())
            }
            DocumentNode::Text { text, format } => {
                let mut out = Vec::new();
                self.render_text(text, *format, &mut out);
                match out.len() {
                    0 => None,
                    1 => out.pop(),
                    _ => Some(Element::new("span").children(out).into()),
                }
            }
            DocumentNode::Unknown { kind, children } => self.render_unknown(kind, children),
        }
    }

    fn render_paragraph(&mut self, children: &[DocumentNode]) -> Markup {
        if self.options.embed_videos && children.iter().any(contains_video) {
            if let Some(block) = self.render_embed_paragraph(children) {
                return block;
            }
        }

        self.count(|s| s.paragraph_count += 1);
        Element::new("p")
            .class(PARAGRAPH_CLASS)
            .children(self.render_inlines(children))
            .into()
    }

    /// Split a paragraph around its video links.
    ///
    /// Embeds become siblings of the surrounding text paragraphs inside a
    /// `<div>`. Returns `None` when no embed could be built.
    fn render_embed_paragraph(&mut self, children: &[DocumentNode]) -> Option<Markup> {
        let saved = self.stats.clone();
        let mut pieces = Vec::new();
        let mut embedded = false;

        for child in children {
            match child {
                DocumentNode::Link { url, children, .. } if is_video_url(url) => {
                    let title = link_text(children);
                    if let Some(embed) = self.render_embed(url, &title) {
                        embedded = true;
                        pieces.extend(embed.map(Piece::Embed));
                        continue;
                    }
                    pieces.extend(self.render_inline_node(child).into_iter().map(Piece::Inline));
                }
                DocumentNode::Text { text, .. } if !find_urls(text).is_empty() => {
                    self.count(|s| s.count_text(text));
                    for segment in split_urls(text) {
                        match segment {
                            TextSegment::Url(url) if is_video_url(url) => {
                                if let Some(embed) = self.render_embed(url, "") {
                                    embedded = true;
                                    pieces.extend(embed.map(Piece::Embed));
                                } else {
                                    pieces.push(Piece::Inline(self.detected_anchor(url)));
                                }
                            }
                            TextSegment::Url(url) => {
                                pieces.push(Piece::Inline(self.detected_anchor(url)));
                            }
                            TextSegment::Literal(part) if !part.trim().is_empty() => {
                                pieces.push(Piece::Inline(
                                    Element::new("span").class(LIST_ITEM_CLASS).text(part).into(),
                                ));
                            }
                            TextSegment::Literal(_) => {}
                        }
                    }
                }
                _ => {
                    pieces.extend(self.render_inline_node(child).into_iter().map(Piece::Inline));
                }
            }
        }

        if !embedded {
            self.stats = saved;
            return None;
        }

        let mut blocks = Vec::new();
        let mut buffer = Vec::new();
        for piece in pieces {
            match piece {
                Piece::Inline(markup) => buffer.push(markup),
                Piece::Embed(markup) => {
                    if !buffer.is_empty() {
                        blocks.push(self.paragraph_from(std::mem::take(&mut buffer)));
                    }
                    blocks.push(markup);
                }
            }
        }
        if !buffer.is_empty() {
            blocks.push(self.paragraph_from(buffer));
        }

        Some(Element::new("div").children(blocks).into())
    }

    fn paragraph_from(&mut self, inlines: Vec<Markup>) -> Markup {
        self.count(|s| s.paragraph_count += 1);
        Element::new("p")
            .class(PARAGRAPH_CLASS)
            .children(inlines)
            .into()
    }

    /// Build an embed for a video URL, consulting the visitor.
    ///
    /// `None` means no embed could be built and the caller should fall back
    /// to an anchor; `Some(None)` means the visitor skipped it.
    fn render_embed(&mut self, url: &str, title: &str) -> Option<Option<Markup>> {
        match self.visitor.visit_embed(url) {
            VisitorAction::Skip => Some(None),
            VisitorAction::Replace(markup) => {
                self.count(|s| s.embed_count += 1);
                Some(Some(markup))
            }
            VisitorAction::Continue => {
                let block = embed_block(url, title)?;
                self.count(|s| s.embed_count += 1);
                Some(Some(block.into()))
            }
        }
    }

    fn render_heading(&mut self, tag: HeadingTag, children: &[DocumentNode]) -> Option<Markup> {
        let text: String = children.iter().map(DocumentNode::plain_text).collect();
        self.count(|s| s.count_text(&text));
        match self.visitor.visit_heading(&text, tag.level()) {
            VisitorAction::Skip => return None,
            VisitorAction::Replace(markup) => {
                self.count(|s| s.heading_count += 1);
                return Some(markup);
            }
            VisitorAction::Continue => {}
        }

        self.count(|s| s.heading_count += 1);
        Some(
            Element::new(tag.as_str())
                .class(heading_classes(tag))
                .text(text)
                .into(),
        )
    }

    fn render_list(&mut self, list_type: ListType, children: &[DocumentNode]) -> Markup {
        self.count(|s| s.list_count += 1);
        let (tag, class) = match list_type {
            ListType::Number => ("ol", "list-decimal pl-6 mb-4 space-y-2"),
            ListType::Bullet => ("ul", "list-disc pl-6 mb-4 space-y-2"),
            ListType::Check => ("ul", "list-none pl-6 mb-4 space-y-2"),
        };

        let items: Vec<Markup> = children
            .iter()
            .map(|child| match child {
                DocumentNode::ListItem { checked, children } => {
                    self.render_list_item(children, Some(list_type), *checked)
                }
                other => self.render_list_item(other.children(), Some(list_type), None),
            })
            .collect();

        Element::new(tag).class(class).children(items).into()
    }

    fn render_list_item(
        &mut self,
        children: &[DocumentNode],
        list_type: Option<ListType>,
        checked: Option<bool>,
    ) -> Markup {
        self.count(|s| s.list_item_count += 1);
        let mut item = Element::new("li").class(LIST_ITEM_CLASS);
        if list_type == Some(ListType::Check) {
            let mut checkbox = Element::new("input")
                .attr("type", "checkbox")
                .attr("disabled", "")
                .class("mr-2");
            if checked == Some(true) {
                checkbox = checkbox.attr("checked", "");
            }
            item = item.child(checkbox);
        }
        item.children(self.render_inlines(children)).into()
    }

    fn render_upload(&mut self, upload: &UploadValue) -> Option<Markup> {
        let url = upload.url.as_deref().filter(|u| !u.is_empty())?;
        match self.visitor.visit_image(upload) {
            VisitorAction::Skip => return None,
            VisitorAction::Replace(markup) => {
                self.count(|s| s.image_count += 1);
                return Some(markup);
            }
            VisitorAction::Continue => {}
        }

        self.count(|s| s.image_count += 1);
        let width = upload.width.filter(|w| *w > 0).unwrap_or(DEFAULT_IMAGE_WIDTH);
        let height = upload.height.filter(|h| *h > 0).unwrap_or(DEFAULT_IMAGE_HEIGHT);
        let src = resolve_asset_url(url, self.options.asset_base_url.as_deref());
        let alt = upload.alt.as_deref().unwrap_or(DEFAULT_IMAGE_ALT);

        let image = Element::new("img")
            .attr("src", src)
            .attr("alt", alt)
            .attr("width", width.to_string())
            .attr("height", height.to_string())
            .attr("loading", "lazy")
            .class(IMAGE_CLASS)
            .attr("style", format!("aspect-ratio: {width}/{height}"));

        Some(
            Element::new("div")
                .class("w-full flex justify-center my-6")
                .child(Element::new("div").class("relative w-full max-w-4xl").child(image))
                .into(),
        )
    }

    fn render_link(&mut self, url: &str, text: &str) -> Option<Markup> {
        let href = if url.is_empty() { "#" } else { url };
        match self.visitor.visit_link(href, text) {
            VisitorAction::Skip => None,
            VisitorAction::Replace(markup) => Some(markup),
            VisitorAction::Continue => {
                self.count(|s| s.link_count += 1);
                Some(external_anchor(href, text).into())
            }
        }
    }

    fn render_unknown(
        &mut self,
        kind: &str,
        children: &Option<Vec<DocumentNode>>,
    ) -> Option<Markup> {
        self.count(|s| s.unknown_count += 1);
        match self.visitor.visit_unknown(kind) {
            VisitorAction::Skip => return None,
            VisitorAction::Replace(markup) => return Some(markup),
            VisitorAction::Continue => {}
        }

        debug!("Rendering unknown node type {kind:?}");
        let children = children.as_ref()?;
        Some(
            Element::new("div")
                .class(UNKNOWN_CLASS)
                .children(self.render_inlines(children))
                .into(),
        )
    }

    fn render_inlines(&mut self, children: &[DocumentNode]) -> Vec<Markup> {
        let mut out = Vec::new();
        for child in children {
            out.extend(self.render_inline_node(child));
        }
        out
    }

    /// Render a node in inline position.
    ///
    /// Containers are flattened into their children, except nested lists
    /// which keep their block structure inside the enclosing item.
    fn render_inline_node(&mut self, node: &DocumentNode) -> Vec<Markup> {
        match node {
            DocumentNode::Link { url, children, .. } => {
                let text = link_text(children);
                self.render_link(url, &text).into_iter().collect()
            }
            DocumentNode::LineBreak => vec![Element::new("br").into()],
            DocumentNode::Upload { value } => self.render_upload(value).into_iter().collect(),
            DocumentNode::Text { text, format } => {
                let mut out = Vec::new();
                self.render_text(text, *format, &mut out);
                out
            }
            DocumentNode::List {
                list_type,
                children,
            } => vec![self.render_list(*list_type, children)],
            other => self.render_inlines(other.children()),
        }
    }

    /// Render a text run, turning detected URLs into anchors.
    fn render_text(&mut self, text: &str, format: TextFormat, out: &mut Vec<Markup>) {
        self.count(|s| s.count_text(text));
        let classes = format_classes(format);
        let segments = split_urls(text);
        if !segments.iter().any(TextSegment::is_url) {
            out.push(Element::new("span").class(classes).text(text).into());
            return;
        }

        for segment in segments {
            match segment {
                TextSegment::Url(url) => out.push(self.detected_anchor(url)),
                TextSegment::Literal(part) if !part.is_empty() => {
                    out.push(Element::new("span").class(classes.as_str()).text(part).into());
                }
                TextSegment::Literal(_) => {}
            }
        }
    }

    fn detected_anchor(&mut self, url: &str) -> Markup {
        self.count(|s| s.link_count += 1);
        styled_anchor(url, url, AnchorStyle::detected(LinkPalette::Prose)).into()
    }
}

/// Link label: concatenated descendant text, or "Link".
fn link_text(children: &[DocumentNode]) -> String {
    let text: String = children.iter().map(DocumentNode::plain_text).collect();
    if text.is_empty() {
        DEFAULT_LINK_TEXT.to_string()
    } else {
        text
    }
}

/// Whether a node or any descendant carries a video URL.
fn contains_video(node: &DocumentNode) -> bool {
    match node {
        DocumentNode::Text { text, .. } => find_urls(text).into_iter().any(is_video_url),
        DocumentNode::Link { url, .. } if is_video_url(url) => true,
        other => other.children().iter().any(contains_video),
    }
}
