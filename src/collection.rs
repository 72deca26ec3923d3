//! Ordered CMS collections.
//!
//! Every listing collection in the CMS carries `isActive` and `order`
//! fields. Consumers show only active entries, lowest `order` first.

use serde::{Deserialize, Serialize};

use crate::model::{MediaRef, PageSection};

/// Image shown when an asset path is missing.
pub const DEFAULT_ASSET: &str = "/default.jpg";

/// An entry of an ordered, toggleable collection.
pub trait Ordered {
    /// Sort key, ascending.
    fn order(&self) -> i64;

    /// Whether the entry is published.
    fn is_active(&self) -> bool;
}

impl<T: Ordered + ?Sized> Ordered for &T {
    fn order(&self) -> i64 {
        (**self).order()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Keep active entries and sort them by `order`. Ties keep their input order.
pub fn active_in_order<I>(items: I) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Ordered,
{
    let mut active: Vec<I::Item> = items.into_iter().filter(|i| i.is_active()).collect();
    active.sort_by_key(|i| i.order());
    active
}

impl Ordered for PageSection {
    fn order(&self) -> i64 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// A secondary navigation link (the fee-link collection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub link: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
}

impl Ordered for NavLink {
    fn order(&self) -> i64 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// A slide of the home page image slider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderImage {
    pub title: String,
    #[serde(default, rename = "Image", alias = "image")]
    pub image: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
}

impl Ordered for SliderImage {
    fn order(&self) -> i64 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

fn default_true() -> bool {
    true
}

/// Resolve a CMS asset path against the asset base URL.
///
/// Absolute `http(s)` URLs are returned unchanged and an empty path yields
/// [`DEFAULT_ASSET`].
pub fn resolve_asset_url(path: &str, base_url: Option<&str>) -> String {
    if path.is_empty() {
        return DEFAULT_ASSET.to_string();
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    match base_url {
        Some(base) if !base.is_empty() => {
            let base = base.trim_end_matches('/');
            if path.starts_with('/') {
                format!("{base}{path}")
            } else {
                format!("{base}/{path}")
            }
        }
        _ => path.to_string(),
    }
}
