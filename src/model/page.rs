//! Normalized page types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DynamicTableConfig, LinkRow, MultipleTableConfig, RichText};

/// Priority given to global pages when ordering navigation.
pub const GLOBAL_PAGE_PRIORITY: i64 = 1000;

/// Origin kind of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// A singleton page managed as a CMS global
    #[default]
    Global,
    /// A database-backed page addressed by slug
    Dynamic,
}

impl PageType {
    /// Parse `"global"` / `"dynamic"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "global" => Some(PageType::Global),
            "dynamic" => Some(PageType::Dynamic),
            _ => None,
        }
    }

    /// The collection pages of this type are stored in.
    pub fn source(self) -> PageSource {
        match self {
            PageType::Global => PageSource::Globals,
            PageType::Dynamic => PageSource::DynamicPages,
        }
    }
}

/// CMS collection a page was loaded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSource {
    #[default]
    Globals,
    DynamicPages,
}

impl PageSource {
    /// Parse `"globals"` / `"dynamic-pages"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "globals" => Some(PageSource::Globals),
            "dynamic-pages" => Some(PageSource::DynamicPages),
            _ => None,
        }
    }

    /// The page type stored in this collection.
    pub fn page_type(self) -> PageType {
        match self {
            PageSource::Globals => PageType::Global,
            PageSource::DynamicPages => PageType::Dynamic,
        }
    }
}

/// Which of a section's payloads is authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    /// Rich text only
    #[default]
    RichText,
    /// Link table only
    Table,
    /// Dynamic table only
    DynamicTable,
    /// Rich text followed by a link table
    Mixed,
    /// Rich text followed by a dynamic table
    MixedDynamic,
    /// Rich text followed by several dynamic tables
    MixedMultipleTables,
}

impl ContentType {
    /// Parse a `contentType` value; unknown values are rich text.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("table") => ContentType::Table,
            Some("dynamicTable") => ContentType::DynamicTable,
            Some("mixed") => ContentType::Mixed,
            Some("mixedDynamic") => ContentType::MixedDynamic,
            Some("mixedMultipleTables") => ContentType::MixedMultipleTables,
            _ => ContentType::RichText,
        }
    }

    /// Whether `content` is rendered.
    pub fn has_rich_text(self) -> bool {
        !matches!(self, ContentType::Table | ContentType::DynamicTable)
    }

    /// Whether `dynamic_table_config` is authoritative.
    pub fn uses_dynamic_table(self) -> bool {
        matches!(self, ContentType::DynamicTable | ContentType::MixedDynamic)
    }

    /// Whether `multiple_tables_config` is authoritative.
    pub fn uses_multiple_tables(self) -> bool {
        self == ContentType::MixedMultipleTables
    }

    /// Whether `table_data` is authoritative.
    pub fn uses_link_table(self) -> bool {
        matches!(self, ContentType::Table | ContentType::Mixed)
    }
}

/// A media document (hero image, section image, OG image).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(
        default,
        rename = "thumbnailURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_url: Option<String>,
}

/// SEO fields as stored by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<MediaRef>,
}

/// Resolved metadata for the document head.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image: Option<MediaRef>,
}

/// One entry of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
}

/// One titled content block of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: RichText,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub table_data: Vec<LinkRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_table_config: Option<DynamicTableConfig>,
    #[serde(default)]
    pub multiple_tables_config: Vec<MultipleTableConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_title: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaRef>,
}

fn default_active() -> bool {
    true
}

/// A page in the canonical shape, whichever collection it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPageResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub page_type: PageType,
    #[serde(default)]
    pub source: PageSource,
    #[serde(default)]
    pub global_type: String,
    #[serde(default)]
    pub hero_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<MediaRef>,
    #[serde(default)]
    pub sections: Vec<PageSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Fields of the raw response without a canonical counterpart
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UnifiedPageResponse {
    /// Check if the page came from the dynamic-pages collection.
    pub fn is_dynamic(&self) -> bool {
        self.page_type == PageType::Dynamic || self.source == PageSource::DynamicPages
    }

    /// Check if the page is a CMS global.
    pub fn is_global(&self) -> bool {
        self.page_type == PageType::Global || self.source == PageSource::Globals
    }

    /// Ordering priority: dynamic pages use their own priority, globals rank first.
    pub fn priority(&self) -> i64 {
        if self.is_dynamic() {
            self.priority.unwrap_or(0)
        } else {
            GLOBAL_PAGE_PRIORITY
        }
    }

    /// Active sections ordered by `order`.
    pub fn active_sections(&self) -> Vec<&PageSection> {
        crate::collection::active_in_order(&self.sections)
    }

    /// Head metadata with page-level fallbacks.
    pub fn seo_metadata(&self) -> SeoMetadata {
        let seo = self.seo.clone().unwrap_or_default();
        SeoMetadata {
            title: first_non_empty([
                seo.meta_title.as_deref(),
                Some(self.hero_title.as_str()),
                self.page_title.as_deref(),
            ]),
            description: first_non_empty([
                seo.meta_description.as_deref(),
                self.hero_subtitle.as_deref(),
            ]),
            keywords: seo.keywords,
            og_image: seo.og_image.or_else(|| self.hero_image.clone()),
        }
    }

    /// Breadcrumb trail: Home, the category of a dynamic page, then the page.
    pub fn breadcrumbs(&self, slug: &str) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: "Home".to_string(),
            href: "/".to_string(),
        }];

        if self.is_dynamic() {
            if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
                crumbs.push(Breadcrumb {
                    label: format_slug_for_display(category),
                    href: format!("/category/{category}"),
                });
            }
        }

        let label = if self.hero_title.is_empty() {
            format_slug_for_display(slug)
        } else {
            self.hero_title.clone()
        };
        crumbs.push(Breadcrumb {
            label,
            href: format!("/{slug}"),
        });
        crumbs
    }

    /// Parsed `updatedAt`, if it is an RFC 3339 timestamp.
    pub fn updated_at_datetime(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }

    /// Parsed `createdAt`, if it is an RFC 3339 timestamp.
    pub fn created_at_datetime(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn first_non_empty<const N: usize>(candidates: [Option<&str>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Turn a slug into a display title: `department-info` → `Department Info`.
pub fn format_slug_for_display(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check that a slug is lower-case words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Canonical URL for a slug. Repeated slashes in the path are collapsed;
/// the `scheme://` separator of the base is left alone.
pub fn canonical_url(slug: &str, base_url: &str) -> String {
    let (origin, path) = match base_url.find("://") {
        Some(idx) => {
            let after_scheme = idx + 3;
            match base_url[after_scheme..].find('/') {
                Some(slash) => base_url.split_at(after_scheme + slash),
                None => (base_url, ""),
            }
        }
        None => ("", base_url),
    };

    let joined = format!("{path}/{slug}");
    let mut collapsed = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    format!("{origin}{collapsed}")
}
