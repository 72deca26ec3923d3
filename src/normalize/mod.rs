//! Page normalization.
//!
//! Globals and dynamic pages are stored in different collections with
//! slightly different shapes. [`normalize`] reconciles both into a
//! [`UnifiedPageResponse`]. Normalization never fails: malformed input
//! yields a mostly empty page titled after its slug.
//!
//! # Example
//!
//! ```
//! use cmsrender::normalize::normalize_value;
//! use serde_json::json;
//!
//! let page = normalize_value(json!({"slug": "department-info"}), "department-info");
//! assert!(page.is_dynamic());
//! assert_eq!(page.hero_title, "Department Info");
//! assert!(page.sections.is_empty());
//! ```

pub mod table;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::detect::{detect_page_type, unwrap_envelope};
use crate::model::{
    dimension, format_slug_for_display, ContentType, MediaRef, PageSection, PageType, RichText,
    SeoData, UnifiedPageResponse,
};

use table::{dynamic_table_from, link_rows_from, multiple_tables_from, stringify, stringify_id};

/// A raw page response whose origin has been decided.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPage {
    /// A CMS global
    Global(PageRecord),
    /// A page from the dynamic-pages collection
    Dynamic(PageRecord),
}

impl RawPage {
    /// Classify a raw page object.
    ///
    /// Explicit `pageType`/`source` fields win; otherwise a `slug` marks a
    /// dynamic page. Non-object input becomes an empty global record.
    pub fn from_value(value: Value) -> Self {
        let page_type = match value.as_object() {
            Some(obj) => detect_page_type(obj),
            None => {
                warn!("page response is not an object, treating it as empty");
                PageType::Global
            }
        };
        Self::with_type(page_type, PageRecord::from_value(value))
    }

    /// Wrap a record with a known page type.
    pub fn with_type(page_type: PageType, record: PageRecord) -> Self {
        match page_type {
            PageType::Global => RawPage::Global(record),
            PageType::Dynamic => RawPage::Dynamic(record),
        }
    }

    /// The page type of this response.
    pub fn page_type(&self) -> PageType {
        match self {
            RawPage::Global(_) => PageType::Global,
            RawPage::Dynamic(_) => PageType::Dynamic,
        }
    }

    /// The underlying record.
    pub fn record(&self) -> &PageRecord {
        match self {
            RawPage::Global(record) | RawPage::Dynamic(record) => record,
        }
    }

    fn into_parts(self) -> (PageType, PageRecord) {
        match self {
            RawPage::Global(record) => (PageType::Global, record),
            RawPage::Dynamic(record) => (PageType::Dynamic, record),
        }
    }
}

/// A page object as returned by the CMS.
///
/// Every field is kept as raw JSON so that decoding an object cannot fail;
/// fields are interpreted during [`normalize`]. Unknown fields land in
/// `extra` and are carried into the normalized page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub created_at: Value,
    #[serde(default)]
    pub updated_at: Value,
    #[serde(default)]
    pub page_type: Value,
    #[serde(default)]
    pub source: Value,
    #[serde(default)]
    pub global_type: Value,
    #[serde(default)]
    pub hero_title: Value,
    #[serde(default)]
    pub hero_subtitle: Value,
    #[serde(default)]
    pub hero_image: Value,
    #[serde(default)]
    pub sections: Value,
    #[serde(default)]
    pub seo: Value,
    #[serde(default)]
    pub priority: Value,
    #[serde(default)]
    pub category: Value,
    #[serde(default)]
    pub page_title: Value,
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub slug: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageRecord {
    /// Decode a page object; anything that is not an object is empty.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|err| {
            warn!("unreadable page record ({err}), treating it as empty");
            Self::default()
        })
    }
}

/// Normalize a raw response: unwrap the page API envelope, classify the
/// page and normalize it.
pub fn normalize_value(value: Value, slug: &str) -> UnifiedPageResponse {
    let raw = match unwrap_envelope(value) {
        (data, Some(page_type)) => RawPage::with_type(page_type, PageRecord::from_value(data)),
        (data, None) => RawPage::from_value(data),
    };
    normalize(raw, slug)
}

/// Reconcile a global or dynamic page into the canonical shape.
pub fn normalize(raw: RawPage, slug: &str) -> UnifiedPageResponse {
    let (page_type, record) = raw.into_parts();
    debug!("normalizing {page_type:?} page {slug:?}");

    let hero_title = [&record.hero_title, &record.page_title, &record.title]
        .into_iter()
        .find_map(|value| value.as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format_slug_for_display(slug));

    let sections = match record.sections {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| section_from(item, index))
            .collect(),
        Value::Null => Vec::new(),
        _ => {
            warn!("page {slug:?} has a non-array sections field, ignoring it");
            Vec::new()
        }
    };

    UnifiedPageResponse {
        id: stringify(Some(&record.id)),
        created_at: string_or_empty(&record.created_at),
        updated_at: string_or_empty(&record.updated_at),
        page_type,
        source: page_type.source(),
        global_type: string_or_empty(&record.global_type),
        hero_title,
        hero_subtitle: non_empty(&record.hero_subtitle),
        hero_image: media_from(&record.hero_image),
        sections,
        seo: seo_from(&record.seo),
        priority: integer(&record.priority),
        category: non_empty(&record.category),
        page_title: non_empty(&record.page_title),
        title: non_empty(&record.title),
        slug: non_empty(&record.slug).or_else(|| Some(slug.to_string()).filter(|s| !s.is_empty())),
        extra: record.extra,
    }
}

/// Normalize one section object. Non-object entries are dropped.
fn section_from(value: Value, index: usize) -> Option<PageSection> {
    let Value::Object(obj) = value else {
        warn!("section {index} is not an object, dropping it");
        return None;
    };

    let content_type = ContentType::parse(obj.get("contentType").and_then(Value::as_str));
    Some(PageSection {
        id: stringify(obj.get("id")),
        title: string_or_empty(obj.get("title").unwrap_or(&Value::Null)),
        content: obj
            .get("content")
            .map(RichText::from_value)
            .unwrap_or_default(),
        content_type,
        table_data: link_rows_from(obj.get("tableData")),
        dynamic_table_config: obj.get("dynamicTableConfig").and_then(dynamic_table_from),
        multiple_tables_config: multiple_tables_from(obj.get("multipleTablesConfig")),
        table_title: obj.get("tableTitle").and_then(non_empty),
        order: obj.get("order").and_then(integer).unwrap_or(0),
        is_active: obj.get("isActive").and_then(Value::as_bool).unwrap_or(true),
        image: obj.get("image").and_then(media_from),
    })
}

/// Decode a media document. A bare string is taken as its URL.
pub fn media_from(value: &Value) -> Option<MediaRef> {
    match value {
        Value::String(url) if !url.is_empty() => Some(MediaRef {
            url: Some(url.clone()),
            ..Default::default()
        }),
        Value::Object(obj) => Some(MediaRef {
            id: stringify_id(obj.get("id")),
            url: obj.get("url").and_then(non_empty),
            alt: obj.get("alt").and_then(non_empty),
            filename: obj.get("filename").and_then(non_empty),
            mime_type: obj.get("mimeType").and_then(non_empty),
            filesize: obj.get("filesize").and_then(Value::as_u64),
            width: obj.get("width").and_then(dimension),
            height: obj.get("height").and_then(dimension),
            thumbnail_url: obj.get("thumbnailURL").and_then(non_empty),
        }),
        _ => None,
    }
}

fn seo_from(value: &Value) -> Option<SeoData> {
    let obj = value.as_object()?;
    Some(SeoData {
        meta_title: obj.get("metaTitle").and_then(non_empty),
        meta_description: obj.get("metaDescription").and_then(non_empty),
        keywords: obj.get("keywords").and_then(non_empty),
        og_image: obj.get("ogImage").and_then(media_from),
    })
}

fn string_or_empty(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|v| v as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
