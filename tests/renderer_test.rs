//! Integration tests for rich-text rendering.

use cmsrender::render::{
    render_rich_text, split_urls, to_html, to_html_with_stats, HtmlRenderer, Markup,
    RenderOptions, TextSegment,
};
use cmsrender::{parse_rich_text, render_str, RichText};
use serde_json::{json, Value};

fn doc(children: Value) -> RichText {
    RichText::from_value(&json!({ "root": { "children": children } }))
}

fn paragraph(text: &str) -> Value {
    json!({"type": "paragraph", "children": [{"type": "text", "text": text}]})
}

// ==================== Placeholder ====================

#[test]
fn test_placeholder_for_missing_root() {
    let options = RenderOptions::default();
    for input in [json!({}), json!(null), json!({"root": null}), json!({"root": {}})] {
        let html = to_html(&RichText::from_value(&input), &options);
        assert_eq!(
            html,
            "<p class=\"text-gray-500 italic\">No content available</p>"
        );
    }
}

#[test]
fn test_placeholder_for_malformed_children() {
    let content = RichText::from_value(&json!({"root": {"children": "oops"}}));
    let html = to_html(&content, &RenderOptions::default());
    assert!(html.contains("No content available"));
}

#[test]
fn test_custom_placeholder() {
    let options = RenderOptions::new().with_placeholder("Coming soon");
    let html = render_str("{}", &options).unwrap();
    assert!(html.contains("Coming soon"));
}

#[test]
fn test_empty_children_renders_container() {
    let html = to_html(&doc(json!([])), &RenderOptions::default());
    assert_eq!(html, "<div class=\"prose max-w-none\"></div>");
}

// ==================== Blocks ====================

#[test]
fn test_blocks_in_order() {
    let content = doc(json!([
        {"type": "heading", "tag": "h1", "children": [{"text": "Welcome"}]},
        paragraph("First"),
        {"type": "quote", "children": [{"text": "Learn"}, {"text": " always"}]},
        paragraph("Last")
    ]));

    let markup = render_rich_text(&content, &RenderOptions::default());
    let root = markup.as_element().unwrap();
    let tags: Vec<&str> = root.children.iter().filter_map(Markup::tag).collect();
    assert_eq!(tags, ["h1", "p", "blockquote", "p"]);
    assert_eq!(root.children[2].text_content(), "Learn always");
}

#[test]
fn test_heading_default_tag() {
    let content = doc(json!([{"type": "heading", "children": [{"text": "Untagged"}]}]));
    let html = to_html(&content, &RenderOptions::default());
    assert!(html.contains("<h3 "));
}

#[test]
fn test_check_list() {
    let content = doc(json!([{
        "type": "list", "listType": "check", "children": [
            {"type": "listitem", "checked": true, "children": [{"text": "Apply"}]},
            {"type": "listitem", "checked": false, "children": [{"text": "Enroll"}]}
        ]
    }]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    let boxes = markup.find_all(&|el| el.tag == "input");
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].get_attr("checked"), Some(""));
    assert_eq!(boxes[1].get_attr("checked"), None);
    assert!(boxes.iter().all(|b| b.get_attr("disabled").is_some()));
}

#[test]
fn test_numbered_list() {
    let content = doc(json!([{
        "type": "list", "listType": "number",
        "children": [{"type": "listitem", "children": [{"text": "One"}]}]
    }]));
    let html = to_html(&content, &RenderOptions::default());
    assert!(html.contains("<ol class=\"list-decimal"));
    assert!(html.contains(">One</span></li>"));
}

#[test]
fn test_upload_defaults() {
    let content = doc(json!([
        {"type": "upload", "value": {"url": "/media/campus.jpg"}},
        {"type": "upload", "value": {}}
    ]));
    let options = RenderOptions::new().with_asset_base("https://cms.example.edu/");
    let markup = render_rich_text(&content, &options);

    let images = markup.find_all(&|el| el.tag == "img");
    assert_eq!(images.len(), 1);
    let img = images[0];
    assert_eq!(img.get_attr("src"), Some("https://cms.example.edu/media/campus.jpg"));
    assert_eq!(img.get_attr("alt"), Some("Content Image"));
    assert_eq!(img.get_attr("width"), Some("800"));
    assert_eq!(img.get_attr("height"), Some("400"));
    assert_eq!(img.get_attr("style"), Some("aspect-ratio: 800/400"));
}

#[test]
fn test_upload_zero_dimensions_use_defaults() {
    let content = doc(json!([
        {"type": "upload", "value": {"url": "/a.png", "width": 0, "height": 0}}
    ]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    let images = markup.find_all(&|el| el.tag == "img");
    assert_eq!(images[0].get_attr("width"), Some("800"));
    assert_eq!(images[0].get_attr("height"), Some("400"));
    assert_eq!(images[0].get_attr("style"), Some("aspect-ratio: 800/400"));
}

#[test]
fn test_authored_link_defaults() {
    let content = doc(json!([{
        "type": "paragraph",
        "children": [{"type": "link", "fields": {}, "children": []}]
    }]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    let anchors = markup.find_all(&|el| el.tag == "a");
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].get_attr("href"), Some("#"));
    assert_eq!(anchors[0].get_attr("target"), Some("_blank"));
    assert_eq!(anchors[0].get_attr("rel"), Some("noopener noreferrer"));
    assert_eq!(anchors[0].children[0].text_content(), "Link");
}

#[test]
fn test_link_url_from_fields() {
    let content = doc(json!([{
        "type": "paragraph",
        "children": [{"type": "link", "fields": {"url": "https://x.edu"}, "children": [{"text": "X"}]}]
    }]));
    let html = to_html(&content, &RenderOptions::default());
    assert!(html.contains("href=\"https://x.edu\""));
}

#[test]
fn test_unknown_node() {
    let content = doc(json!([
        {"type": "horizontalrule"},
        {"type": "callout", "children": [{"text": "Note"}]}
    ]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    let root = markup.as_element().unwrap();
    assert_eq!(root.children.len(), 1);
    let callout = root.children[0].as_element().unwrap();
    assert!(callout.has_class("mb-2"));
    assert_eq!(callout.text_content(), "Note");
}

#[test]
fn test_text_is_escaped() {
    let content = doc(json!([paragraph("<script>alert(1)</script> & co")]));
    let html = to_html(&content, &RenderOptions::default());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&amp; co"));
}

#[test]
fn test_text_format_classes() {
    let content = doc(json!([{
        "type": "paragraph",
        "children": [{"type": "text", "text": "Both", "format": 3}]
    }]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    let spans = markup.find_all(&|el| el.tag == "span");
    assert!(spans[0].has_class("font-bold"));
    assert!(spans[0].has_class("italic"));
    assert!(!spans[0].has_class("underline"));
}

// ==================== URLs ====================

#[test]
fn test_split_urls_reassembles() {
    let inputs = [
        "",
        "no links here",
        "https://a.edu",
        "See https://a.edu/x.pdf, then http://b.org/?q=1!",
        "(https://c.io) and 'https://d.io'",
    ];
    for input in inputs {
        let joined: String = split_urls(input).iter().map(TextSegment::as_str).collect();
        assert_eq!(joined, input);
    }
}

#[test]
fn test_trailing_punctuation_stays_text() {
    let segments = split_urls("Go to https://a.edu/apply.");
    assert_eq!(segments[1], TextSegment::Url("https://a.edu/apply"));
    assert_eq!(segments[2], TextSegment::Literal("."));
}

#[test]
fn test_pdf_and_plain_urls() {
    let content = doc(json!([paragraph(
        "Forms: https://a.edu/form.PDF?v=2 and https://a.edu/info"
    )]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    let anchors = markup.find_all(&|el| el.tag == "a");
    assert_eq!(anchors.len(), 2);
    assert_eq!(anchors[0].get_attr("title"), Some("Download PDF"));
    assert!(anchors[0].has_class("text-red-600"));
    assert_eq!(anchors[1].get_attr("title"), Some("Open link"));
    assert!(anchors[1].has_class("text-blue-600"));
}

// ==================== Embeds ====================

#[test]
fn test_video_in_text_splits_paragraph() {
    let content = doc(json!([paragraph("Visit https://youtu.be/abc123 today")]));
    let markup = render_rich_text(&content, &RenderOptions::default());

    let root = markup.as_element().unwrap();
    let wrapper = root.children[0].as_element().unwrap();
    assert_eq!(wrapper.tag, "div");
    assert_eq!(wrapper.children.len(), 3);

    let first = wrapper.children[0].as_element().unwrap();
    assert_eq!(first.tag, "p");
    assert_eq!(first.text_content(), "Visit ");

    let iframes = wrapper.children[1].find_all(&|el| el.tag == "iframe");
    assert_eq!(iframes[0].get_attr("src"), Some("https://www.youtube.com/embed/abc123"));

    // No anchor was produced for the video URL, and no iframe sits in a <p>.
    assert!(markup.find_all(&|el| el.tag == "a").is_empty());
    for p in markup.find_all(&|el| el.tag == "p") {
        assert!(Markup::from(p.clone()).find_all(&|el| el.tag == "iframe").is_empty());
    }
}

#[test]
fn test_video_link_node_embeds() {
    let content = doc(json!([{
        "type": "paragraph",
        "children": [{
            "type": "link", "url": "https://vimeo.com/76979871",
            "children": [{"text": "Campus tour"}]
        }]
    }]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    let iframes = markup.find_all(&|el| el.tag == "iframe");
    assert_eq!(iframes.len(), 1);
    assert_eq!(iframes[0].get_attr("src"), Some("https://player.vimeo.com/video/76979871"));
    assert_eq!(iframes[0].get_attr("title"), Some("Campus tour"));
}

#[test]
fn test_embeds_disabled() {
    let content = doc(json!([paragraph("Watch https://www.youtube.com/watch?v=xyz")]));
    let options = RenderOptions::new().with_embeds(false);
    let markup = render_rich_text(&content, &options);
    assert!(markup.find_all(&|el| el.tag == "iframe").is_empty());
    assert_eq!(markup.find_all(&|el| el.tag == "a").len(), 1);
}

#[test]
fn test_video_without_id_falls_back_to_anchor() {
    let content = doc(json!([paragraph("Channel https://www.youtube.com/")]));
    let markup = render_rich_text(&content, &RenderOptions::default());
    assert!(markup.find_all(&|el| el.tag == "iframe").is_empty());
    assert_eq!(markup.find_all(&|el| el.tag == "a").len(), 1);
}

// ==================== Stats ====================

#[test]
fn test_render_with_stats() {
    let content = doc(json!([
        {"type": "heading", "tag": "h2", "children": [{"text": "Fees"}]},
        paragraph("Pay before June"),
        {"type": "list", "children": [{"type": "listitem", "children": [{"text": "Online"}]}]}
    ]));
    let result = to_html_with_stats(&content, &RenderOptions::default());
    assert_eq!(result.stats.heading_count, 1);
    assert_eq!(result.stats.paragraph_count, 1);
    assert_eq!(result.stats.list_count, 1);
    assert_eq!(result.stats.list_item_count, 1);
    assert_eq!(result.stats.word_count, 5);
    assert_eq!(result.html, result.markup.to_html());
}

#[test]
fn test_stats_off_by_default() {
    let content = doc(json!([paragraph("Hello")]));
    let mut renderer = HtmlRenderer::new(RenderOptions::default());
    renderer.render_rich_text(&content);
    assert_eq!(renderer.stats().paragraph_count, 0);
}

#[test]
fn test_parse_rich_text_any_json() {
    for input in ["[]", "42", "\"text\"", "{\"root\": 1}"] {
        let doc = parse_rich_text(input).unwrap();
        assert!(to_html(&doc, &RenderOptions::default()).contains("No content available"));
    }
}
