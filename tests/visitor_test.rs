//! Integration tests for the visitor pattern.

use cmsrender::model::{RichText, UploadValue};
use cmsrender::render::visitor::{
    CompositeVisitor, DefaultVisitor, MaxHeadingDepthVisitor, NodeVisitor, SkipImagesVisitor,
    VisitorAction,
};
use cmsrender::render::{Element, HtmlRenderer, Markup, RenderOptions};
use serde_json::json;

/// Custom visitor that tracks visit counts.
struct CountingVisitor {
    heading_count: usize,
    link_count: usize,
    embed_count: usize,
    image_count: usize,
    unknown_kinds: Vec<String>,
}

impl CountingVisitor {
    fn new() -> Self {
        Self {
            heading_count: 0,
            link_count: 0,
            embed_count: 0,
            image_count: 0,
            unknown_kinds: Vec::new(),
        }
    }
}

impl NodeVisitor for CountingVisitor {
    fn visit_heading(&mut self, _text: &str, _level: u8) -> VisitorAction {
        self.heading_count += 1;
        VisitorAction::Continue
    }

    fn visit_link(&mut self, _url: &str, _text: &str) -> VisitorAction {
        self.link_count += 1;
        VisitorAction::Continue
    }

    fn visit_embed(&mut self, _url: &str) -> VisitorAction {
        self.embed_count += 1;
        VisitorAction::Continue
    }

    fn visit_image(&mut self, _upload: &UploadValue) -> VisitorAction {
        self.image_count += 1;
        VisitorAction::Continue
    }

    fn visit_unknown(&mut self, kind: &str) -> VisitorAction {
        self.unknown_kinds.push(kind.to_string());
        VisitorAction::Continue
    }
}

/// Visitor that replaces every authored link with its text.
struct UnlinkVisitor;

impl NodeVisitor for UnlinkVisitor {
    fn visit_link(&mut self, _url: &str, text: &str) -> VisitorAction {
        VisitorAction::Replace(Element::new("span").class("unlinked").text(text).into())
    }
}

/// Visitor that drops every embed.
struct NoEmbedsVisitor;

impl NodeVisitor for NoEmbedsVisitor {
    fn visit_embed(&mut self, _url: &str) -> VisitorAction {
        VisitorAction::Skip
    }
}

fn sample() -> RichText {
    RichText::from_value(&json!({"root": {"children": [
        {"type": "heading", "tag": "h1", "children": [{"text": "Title"}]},
        {"type": "heading", "tag": "h5", "children": [{"text": "Small"}]},
        {"type": "paragraph", "children": [
            {"type": "link", "url": "https://x.edu", "children": [{"text": "site"}]}
        ]},
        {"type": "paragraph", "children": [{"text": "https://youtu.be/abc123"}]},
        {"type": "upload", "value": {"url": "/a.png"}},
        {"type": "table", "children": [{"text": "cell"}]}
    ]}}))
}

#[test]
fn test_default_visitor_all_continue() {
    let mut visitor = DefaultVisitor::new();
    assert!(matches!(visitor.visit_heading("x", 1), VisitorAction::Continue));
    assert!(matches!(visitor.visit_link("u", "t"), VisitorAction::Continue));
    assert!(matches!(visitor.visit_embed("u"), VisitorAction::Continue));
    assert!(matches!(
        visitor.visit_image(&UploadValue::default()),
        VisitorAction::Continue
    ));
    assert!(matches!(visitor.visit_unknown("k"), VisitorAction::Continue));
}

#[test]
fn test_counting_visitor_through_renderer() {
    // The renderer owns its visitor, so count through a shared handle.
    use std::sync::{Arc, Mutex};

    struct Shared(Arc<Mutex<CountingVisitor>>);

    impl NodeVisitor for Shared {
        fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
            self.0.lock().unwrap().visit_heading(text, level)
        }
        fn visit_link(&mut self, url: &str, text: &str) -> VisitorAction {
            self.0.lock().unwrap().visit_link(url, text)
        }
        fn visit_embed(&mut self, url: &str) -> VisitorAction {
            self.0.lock().unwrap().visit_embed(url)
        }
        fn visit_image(&mut self, upload: &UploadValue) -> VisitorAction {
            self.0.lock().unwrap().visit_image(upload)
        }
        fn visit_unknown(&mut self, kind: &str) -> VisitorAction {
            self.0.lock().unwrap().visit_unknown(kind)
        }
    }

    let counts = Arc::new(Mutex::new(CountingVisitor::new()));
    HtmlRenderer::new(RenderOptions::default())
        .with_visitor(Shared(Arc::clone(&counts)))
        .render(&sample());

    let counts = counts.lock().unwrap();
    assert_eq!(counts.heading_count, 2);
    assert_eq!(counts.link_count, 1);
    assert_eq!(counts.embed_count, 1);
    assert_eq!(counts.image_count, 1);
    assert_eq!(counts.unknown_kinds, ["table"]);
}

#[test]
fn test_skip_images_visitor() {
    let markup = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(SkipImagesVisitor)
        .render(&sample());
    assert!(markup.find_all(&|el| el.tag == "img").is_empty());
    assert_eq!(markup.find_all(&|el| el.tag == "iframe").len(), 1);
}

#[test]
fn test_max_heading_depth_visitor() {
    let mut visitor = MaxHeadingDepthVisitor::new(3);
    assert!(matches!(visitor.visit_heading("Title", 2), VisitorAction::Continue));

    let action = visitor.visit_heading("Deep", 5);
    let replacement = action.replacement().unwrap();
    assert_eq!(replacement.tag(), Some("h3"));
    assert_eq!(replacement.text_content(), "Deep");

    let markup = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(MaxHeadingDepthVisitor::new(3))
        .render(&sample());
    assert!(markup.find_all(&|el| el.tag == "h5").is_empty());
    assert_eq!(markup.find_all(&|el| el.tag == "h3").len(), 1);
}

#[test]
fn test_replace_link() {
    let markup = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(UnlinkVisitor)
        .render(&sample());
    let spans = markup.find_all(&|el| el.has_class("unlinked"));
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text_content(), "site");
}

#[test]
fn test_skip_embed() {
    let markup = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(NoEmbedsVisitor)
        .render(&sample());
    assert!(markup.find_all(&|el| el.tag == "iframe").is_empty());
}

#[test]
fn test_composite_visitor_first_action_wins() {
    let mut visitor = CompositeVisitor::new()
        .with_visitor(DefaultVisitor)
        .with_visitor(MaxHeadingDepthVisitor::new(2))
        .with_visitor(SkipImagesVisitor);

    assert!(visitor.visit_heading("Deep", 4).is_replace());
    assert!(visitor.visit_image(&UploadValue::default()).should_skip());
    assert!(matches!(visitor.visit_link("u", "t"), VisitorAction::Continue));
}

#[test]
fn test_visitor_action_helpers() {
    let replace = VisitorAction::Replace(Markup::text("x"));
    assert!(replace.is_replace());
    assert!(!replace.should_skip());
    assert_eq!(replace.replacement(), Some(&Markup::text("x")));
    assert!(VisitorAction::Skip.should_skip());
    assert!(VisitorAction::Continue.replacement().is_none());
}
