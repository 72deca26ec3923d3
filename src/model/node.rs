//! Rich-text document nodes.
//!
//! The CMS editor stores content as a JSON tree of typed nodes. Decoding is
//! total: any JSON value becomes *some* node, with absent or malformed fields
//! replaced by defaults, so a document of uncertain shape can always be
//! rendered.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

/// The content of a rich-text field: `{ "root": { "children": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichText {
    /// Document root, `None` when the field is absent or not an object
    pub root: Option<RootNode>,
}

impl RichText {
    /// Create a document from top-level nodes.
    pub fn new(children: Vec<DocumentNode>) -> Self {
        Self {
            root: Some(RootNode {
                children: Some(children),
            }),
        }
    }

    /// Decode a rich-text field. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let root = value
            .get("root")
            .filter(|root| root.is_object())
            .map(RootNode::from_value);
        Self { root }
    }

    /// Top-level nodes, or `None` when the document has no children array.
    pub fn children(&self) -> Option<&[DocumentNode]> {
        self.root
            .as_ref()
            .and_then(|root| root.children.as_deref())
    }

    /// Check if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.children().map_or(true, |c| c.is_empty())
    }

    /// Plain text of the whole document, one block per line.
    pub fn plain_text(&self) -> String {
        self.children()
            .unwrap_or_default()
            .iter()
            .map(DocumentNode::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Encode back to the CMS JSON shape.
    pub fn to_value(&self) -> Value {
        match &self.root {
            Some(root) => json!({ "root": root.to_value() }),
            None => json!({}),
        }
    }
}

/// The `root` node of a rich-text document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootNode {
    /// Top-level blocks, `None` when `children` is absent or not an array
    pub children: Option<Vec<DocumentNode>>,
}

impl RootNode {
    fn from_value(value: &Value) -> Self {
        Self {
            children: value
                .get("children")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(DocumentNode::from_value).collect()),
        }
    }

    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".into(), "root".into());
        if let Some(ref children) = self.children {
            obj.insert("children".into(), nodes_to_value(children));
        }
        Value::Object(obj)
    }
}

/// A node of the rich-text tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    /// A nested root
    Root { children: Vec<DocumentNode> },

    /// A paragraph of inline content
    Paragraph { children: Vec<DocumentNode> },

    /// A heading (h1-h6)
    Heading {
        tag: HeadingTag,
        children: Vec<DocumentNode>,
    },

    /// A bulleted, numbered or checkbox list
    List {
        list_type: ListType,
        children: Vec<DocumentNode>,
    },

    /// An item of a list
    ListItem {
        /// Checkbox state for check lists
        checked: Option<bool>,
        children: Vec<DocumentNode>,
    },

    /// A block quote
    Quote { children: Vec<DocumentNode> },

    /// A hyperlink; the children hold the link text
    Link {
        kind: LinkKind,
        url: String,
        children: Vec<DocumentNode>,
    },

    /// An uploaded media item (image)
    Upload { value: UploadValue },

    /// A hard line break
    LineBreak,

    /// A run of text
    Text { text: String, format: TextFormat },

    /// A node whose type is not recognized
    Unknown {
        /// The raw `type` value (empty when absent)
        kind: String,
        children: Option<Vec<DocumentNode>>,
    },
}

impl DocumentNode {
    /// Create a plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        DocumentNode::Text {
            text: text.into(),
            format: TextFormat::default(),
        }
    }

    /// Create a paragraph node.
    pub fn paragraph(children: Vec<DocumentNode>) -> Self {
        DocumentNode::Paragraph { children }
    }

    /// Create a link node.
    pub fn link(url: impl Into<String>, text: impl Into<String>) -> Self {
        DocumentNode::Link {
            kind: LinkKind::Link,
            url: url.into(),
            children: vec![DocumentNode::text(text)],
        }
    }

    /// Decode a node from JSON. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log::warn!("rich-text node is not an object, ignoring it");
            return DocumentNode::Unknown {
                kind: String::new(),
                children: None,
            };
        };

        match obj.get("type").and_then(Value::as_str) {
            Some("root") => DocumentNode::Root {
                children: children_of(obj),
            },
            Some("paragraph") => DocumentNode::Paragraph {
                children: children_of(obj),
            },
            Some("heading") => DocumentNode::Heading {
                tag: HeadingTag::parse(str_field(obj, "tag")),
                children: children_of(obj),
            },
            Some("list") => DocumentNode::List {
                list_type: ListType::parse(str_field(obj, "listType")),
                children: children_of(obj),
            },
            Some("listitem") => DocumentNode::ListItem {
                checked: obj.get("checked").and_then(Value::as_bool),
                children: children_of(obj),
            },
            Some("quote") => DocumentNode::Quote {
                children: children_of(obj),
            },
            Some("link") => link_from(obj, LinkKind::Link),
            Some("autolink") => link_from(obj, LinkKind::Autolink),
            Some("upload") => DocumentNode::Upload {
                value: UploadValue::from_value(obj.get("value")),
            },
            Some("linebreak") => DocumentNode::LineBreak,
            Some("text") => text_from(obj),
            Some(other) => {
                log::debug!("unrecognized rich-text node type {other:?}");
                DocumentNode::Unknown {
                    kind: other.to_string(),
                    children: optional_children_of(obj),
                }
            }
            // Untyped nodes are classified by the fields they carry.
            None if link_url(obj).is_some() => link_from(obj, LinkKind::Link),
            None if obj.contains_key("text") => text_from(obj),
            None => DocumentNode::Unknown {
                kind: String::new(),
                children: optional_children_of(obj),
            },
        }
    }

    /// Encode back to the CMS JSON shape.
    pub fn to_value(&self) -> Value {
        match self {
            DocumentNode::Root { children } => typed("root", children),
            DocumentNode::Paragraph { children } => typed("paragraph", children),
            DocumentNode::Heading { tag, children } => {
                let mut value = typed("heading", children);
                value["tag"] = tag.as_str().into();
                value
            }
            DocumentNode::List {
                list_type,
                children,
            } => {
                let mut value = typed("list", children);
                value["listType"] = list_type.as_str().into();
                value
            }
            DocumentNode::ListItem { checked, children } => {
                let mut value = typed("listitem", children);
                if let Some(checked) = checked {
                    value["checked"] = (*checked).into();
                }
                value
            }
            DocumentNode::Quote { children } => typed("quote", children),
            DocumentNode::Link {
                kind,
                url,
                children,
            } => {
                let mut value = typed(kind.as_str(), children);
                value["url"] = url.as_str().into();
                value
            }
            DocumentNode::Upload { value } => json!({
                "type": "upload",
                "value": value,
            }),
            DocumentNode::LineBreak => json!({ "type": "linebreak" }),
            DocumentNode::Text { text, format } => json!({
                "type": "text",
                "text": text,
                "format": format.bits(),
            }),
            DocumentNode::Unknown { kind, children } => {
                let mut obj = Map::new();
                if !kind.is_empty() {
                    obj.insert("type".into(), kind.as_str().into());
                }
                if let Some(children) = children {
                    obj.insert("children".into(), nodes_to_value(children));
                }
                Value::Object(obj)
            }
        }
    }

    /// Child nodes in document order (empty for leaves).
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Root { children }
            | DocumentNode::Paragraph { children }
            | DocumentNode::Heading { children, .. }
            | DocumentNode::List { children, .. }
            | DocumentNode::ListItem { children, .. }
            | DocumentNode::Quote { children }
            | DocumentNode::Link { children, .. } => children,
            DocumentNode::Unknown { children, .. } => children.as_deref().unwrap_or_default(),
            DocumentNode::Upload { .. } | DocumentNode::LineBreak | DocumentNode::Text { .. } => {
                &[]
            }
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        match self {
            DocumentNode::Text { text, .. } => text.clone(),
            DocumentNode::LineBreak => "\n".to_string(),
            DocumentNode::Upload { .. } => String::new(),
            _ => self.children().iter().map(DocumentNode::plain_text).collect(),
        }
    }

    /// Name of the node type as it appears in the CMS JSON.
    pub fn kind(&self) -> &str {
        match self {
            DocumentNode::Root { .. } => "root",
            DocumentNode::Paragraph { .. } => "paragraph",
            DocumentNode::Heading { .. } => "heading",
            DocumentNode::List { .. } => "list",
            DocumentNode::ListItem { .. } => "listitem",
            DocumentNode::Quote { .. } => "quote",
            DocumentNode::Link { kind, .. } => kind.as_str(),
            DocumentNode::Upload { .. } => "upload",
            DocumentNode::LineBreak => "linebreak",
            DocumentNode::Text { .. } => "text",
            DocumentNode::Unknown { kind, .. } => kind,
        }
    }
}

/// Inline text formatting bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextFormat(u32);

impl TextFormat {
    /// Bold text
    pub const BOLD: TextFormat = TextFormat(1);
    /// Italic text
    pub const ITALIC: TextFormat = TextFormat(2);
    /// Underlined text
    pub const UNDERLINE: TextFormat = TextFormat(4);

    /// Create a format from raw bits.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Check whether all flags of `other` are set.
    pub fn contains(self, other: TextFormat) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// Check if the text is bold.
    pub fn is_bold(self) -> bool {
        self.contains(Self::BOLD)
    }

    /// Check if the text is italic.
    pub fn is_italic(self) -> bool {
        self.contains(Self::ITALIC)
    }

    /// Check if the text is underlined.
    pub fn is_underline(self) -> bool {
        self.contains(Self::UNDERLINE)
    }
}

impl std::ops::BitOr for TextFormat {
    type Output = TextFormat;

    fn bitor(self, rhs: TextFormat) -> TextFormat {
        TextFormat(self.0 | rhs.0)
    }
}

/// Heading level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeadingTag {
    H1,
    H2,
    #[default]
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    /// Parse `h1`..`h6`; anything else is treated as `h3`.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some("h1") => HeadingTag::H1,
            Some("h2") => HeadingTag::H2,
            Some("h3") => HeadingTag::H3,
            Some("h4") => HeadingTag::H4,
            Some("h5") => HeadingTag::H5,
            Some("h6") => HeadingTag::H6,
            other => {
                if other.is_some() {
                    log::debug!("unknown heading tag {other:?}, using h3");
                }
                HeadingTag::H3
            }
        }
    }

    /// Create a tag from a level (clamped to 1-6).
    pub fn from_level(level: u8) -> Self {
        match level.clamp(1, 6) {
            1 => HeadingTag::H1,
            2 => HeadingTag::H2,
            3 => HeadingTag::H3,
            4 => HeadingTag::H4,
            5 => HeadingTag::H5,
            _ => HeadingTag::H6,
        }
    }

    /// Heading level (1-6).
    pub fn level(self) -> u8 {
        match self {
            HeadingTag::H1 => 1,
            HeadingTag::H2 => 2,
            HeadingTag::H3 => 3,
            HeadingTag::H4 => 4,
            HeadingTag::H5 => 5,
            HeadingTag::H6 => 6,
        }
    }

    /// HTML tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingTag::H1 => "h1",
            HeadingTag::H2 => "h2",
            HeadingTag::H3 => "h3",
            HeadingTag::H4 => "h4",
            HeadingTag::H5 => "h5",
            HeadingTag::H6 => "h6",
        }
    }
}

/// Kind of list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ListType {
    /// Unordered list
    #[default]
    Bullet,
    /// Ordered list
    Number,
    /// Checkbox list
    Check,
}

impl ListType {
    /// Parse a `listType` value; unknown values are bullets.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("number") => ListType::Number,
            Some("check") => ListType::Check,
            _ => ListType::Bullet,
        }
    }

    /// Value as stored by the CMS.
    pub fn as_str(self) -> &'static str {
        match self {
            ListType::Bullet => "bullet",
            ListType::Number => "number",
            ListType::Check => "check",
        }
    }
}

/// Whether a link was written by the author or detected by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LinkKind {
    #[default]
    Link,
    Autolink,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Link => "link",
            LinkKind::Autolink => "autolink",
        }
    }
}

/// The media document referenced by an `upload` node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl UploadValue {
    /// Decode leniently; wrong-typed fields become `None`.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            return Self::default();
        };
        Self {
            url: non_empty(str_field(obj, "url")),
            alt: non_empty(str_field(obj, "alt")),
            width: obj.get("width").and_then(dimension),
            height: obj.get("height").and_then(dimension),
            filename: non_empty(str_field(obj, "filename")),
            mime_type: non_empty(str_field(obj, "mimeType")),
        }
    }
}

impl Serialize for RichText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl Serialize for DocumentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DocumentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Lenient pixel dimension. Zero, negative and non-numeric values are absent.
pub(crate) fn dimension(value: &Value) -> Option<u32> {
    value
        .as_u64()
        .map(|v| v.min(u64::from(u32::MAX)) as u32)
        .or_else(|| value.as_f64().filter(|v| *v > 0.0).map(|v| v.round() as u32))
        .filter(|v| *v > 0)
}

fn children_of(obj: &Map<String, Value>) -> Vec<DocumentNode> {
    optional_children_of(obj).unwrap_or_default()
}

fn optional_children_of(obj: &Map<String, Value>) -> Option<Vec<DocumentNode>> {
    obj.get("children")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(DocumentNode::from_value).collect())
}

/// Link target: `url`, then `fields.url`.
fn link_url(obj: &Map<String, Value>) -> Option<&str> {
    non_empty_str(str_field(obj, "url")).or_else(|| {
        obj.get("fields")
            .and_then(|fields| fields.get("url"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    })
}

fn non_empty_str(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn link_from(obj: &Map<String, Value>, kind: LinkKind) -> DocumentNode {
    let mut children = children_of(obj);
    if children.is_empty() {
        if let Some(text) = non_empty_str(str_field(obj, "text")) {
            children.push(DocumentNode::text(text));
        }
    }
    DocumentNode::Link {
        kind,
        url: link_url(obj).unwrap_or_default().to_string(),
        children,
    }
}

fn text_from(obj: &Map<String, Value>) -> DocumentNode {
    let format = obj
        .get("format")
        .and_then(Value::as_u64)
        .map(|bits| TextFormat::from_bits(bits as u32))
        .unwrap_or_default();
    DocumentNode::Text {
        text: str_field(obj, "text").unwrap_or_default().to_string(),
        format,
    }
}

fn nodes_to_value(nodes: &[DocumentNode]) -> Value {
    Value::Array(nodes.iter().map(DocumentNode::to_value).collect())
}

fn typed(kind: &str, children: &[DocumentNode]) -> Value {
    json!({
        "type": kind,
        "children": nodes_to_value(children),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_paragraph() {
        let node = DocumentNode::from_value(&json!({
            "type": "paragraph",
            "children": [
                { "type": "text", "text": "Hello ", "format": 0 },
                { "type": "text", "text": "world", "format": 1 }
            ]
        }));

        match &node {
            DocumentNode::Paragraph { children } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(
                    &children[1],
                    DocumentNode::Text { format, .. } if format.is_bold()
                ));
            }
            other => panic!("Expected paragraph, got {other:?}"),
        }
        assert_eq!(node.plain_text(), "Hello world");
    }

    #[test]
    fn test_decode_link_from_fields() {
        let node = DocumentNode::from_value(&json!({
            "type": "link",
            "fields": { "url": "https://example.com" },
            "children": [{ "type": "text", "text": "Example" }]
        }));
        assert!(matches!(
            node,
            DocumentNode::Link { ref url, .. } if url == "https://example.com"
        ));
    }

    #[test]
    fn test_untyped_nodes_are_classified() {
        let text = DocumentNode::from_value(&json!({ "text": "loose" }));
        assert!(matches!(text, DocumentNode::Text { ref text, .. } if text == "loose"));

        let link = DocumentNode::from_value(&json!({ "url": "https://a.b", "text": "ab" }));
        assert_eq!(link.plain_text(), "ab");
        assert_eq!(link.kind(), "link");
    }

    #[test]
    fn test_malformed_nodes_degrade() {
        let node = DocumentNode::from_value(&json!(42));
        assert!(matches!(node, DocumentNode::Unknown { children: None, .. }));

        let node = DocumentNode::from_value(&json!({ "type": "paragraph", "children": "oops" }));
        assert!(node.children().is_empty());

        let node = DocumentNode::from_value(&json!({ "type": "heading", "tag": "h9" }));
        assert!(matches!(node, DocumentNode::Heading { tag: HeadingTag::H3, .. }));
    }

    #[test]
    fn test_unknown_keeps_children() {
        let node = DocumentNode::from_value(&json!({
            "type": "custom-block",
            "children": [{ "type": "text", "text": "inside" }]
        }));
        assert_eq!(node.kind(), "custom-block");
        assert_eq!(node.plain_text(), "inside");
    }

    #[test]
    fn test_upload_value_lenient() {
        let value = UploadValue::from_value(Some(&json!({
            "url": "/media/a.png",
            "width": 1200.0,
            "height": "tall"
        })));
        assert_eq!(value.url.as_deref(), Some("/media/a.png"));
        assert_eq!(value.width, Some(1200));
        assert_eq!(value.height, None);
    }

    #[test]
    fn test_zero_dimensions_are_absent() {
        let value = UploadValue::from_value(Some(&json!({"width": 0, "height": 0.0})));
        assert_eq!(value.width, None);
        assert_eq!(value.height, None);
        assert_eq!(dimension(&json!(-5)), None);
        assert_eq!(dimension(&json!(640)), Some(640));
    }

    #[test]
    fn test_rich_text_missing_children() {
        let doc = RichText::from_value(&json!({ "root": { "type": "root" } }));
        assert!(doc.root.is_some());
        assert!(doc.children().is_none());
        assert!(doc.is_empty());

        let doc = RichText::from_value(&json!(null));
        assert!(doc.root.is_none());
    }

    #[test]
    fn test_rich_text_serde() {
        let doc: RichText = serde_json::from_value(json!({
            "root": {
                "children": [
                    { "type": "heading", "tag": "h2", "children": [{ "type": "text", "text": "Title" }] }
                ]
            }
        }))
        .unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["root"]["children"][0]["tag"], "h2");
        assert_eq!(doc.plain_text(), "Title");
    }

    #[test]
    fn test_text_format_flags() {
        let format = TextFormat::BOLD | TextFormat::UNDERLINE;
        assert!(format.is_bold());
        assert!(!format.is_italic());
        assert!(format.is_underline());
        assert_eq!(format.bits(), 5);
    }

    #[test]
    fn test_heading_tag_levels() {
        assert_eq!(HeadingTag::parse(Some("h1")).level(), 1);
        assert_eq!(HeadingTag::parse(None), HeadingTag::H3);
        assert_eq!(HeadingTag::from_level(9), HeadingTag::H6);
    }
}
