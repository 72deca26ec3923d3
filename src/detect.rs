//! Response shape detection.
//!
//! Page responses reach the renderer in one of two shapes: a CMS global
//! returned directly as an object, or a dynamic page wrapped in a
//! `{ "success": true, "data": { ... } }` envelope by the page API.

use serde_json::{Map, Value};

use crate::model::{PageSource, PageType};

/// Shape of a raw page response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{ "success": true, "data": { ... } }`
    Envelope,
    /// A page object with an `id`
    Direct,
    /// Anything else
    Unrecognized,
}

impl std::fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseShape::Envelope => write!(f, "envelope"),
            ResponseShape::Direct => write!(f, "direct"),
            ResponseShape::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Classify a raw response.
pub fn detect_shape(value: &Value) -> ResponseShape {
    let Some(obj) = value.as_object() else {
        return ResponseShape::Unrecognized;
    };

    if is_envelope(obj) {
        ResponseShape::Envelope
    } else if obj.get("id").is_some_and(|id| !id.is_null()) {
        ResponseShape::Direct
    } else {
        ResponseShape::Unrecognized
    }
}

fn is_envelope(obj: &Map<String, Value>) -> bool {
    obj.get("success").and_then(Value::as_bool) == Some(true)
        && obj.get("data").is_some_and(Value::is_object)
}

/// Strip the page API envelope.
///
/// An envelope marks a dynamic page: its `data` object is returned with
/// `Some(PageType::Dynamic)`. Any other value is returned as is, with no
/// type decided.
///
/// # Example
/// ```
/// use cmsrender::detect::unwrap_envelope;
/// use cmsrender::model::PageType;
/// use serde_json::json;
///
/// let (page, kind) = unwrap_envelope(json!({"success": true, "data": {"id": "7"}}));
/// assert_eq!(page["id"], "7");
/// assert_eq!(kind, Some(PageType::Dynamic));
/// ```
pub fn unwrap_envelope(value: Value) -> (Value, Option<PageType>) {
    match value {
        Value::Object(mut obj) if is_envelope(&obj) => {
            let data = obj.remove("data").unwrap_or(Value::Null);
            (data, Some(PageType::Dynamic))
        }
        other => (other, None),
    }
}

/// Decide the page type of a page object.
///
/// Explicit `pageType` wins, then `source`; otherwise a non-empty `slug`
/// marks a dynamic page.
pub fn detect_page_type(obj: &Map<String, Value>) -> PageType {
    if let Some(page_type) = obj.get("pageType").and_then(Value::as_str).and_then(PageType::parse) {
        return page_type;
    }
    if let Some(source) = obj.get("source").and_then(Value::as_str).and_then(PageSource::parse) {
        return source.page_type();
    }
    match obj.get("slug").and_then(Value::as_str) {
        Some(slug) if !slug.is_empty() => PageType::Dynamic,
        _ => PageType::Global,
    }
}
