//! Home page loading-state store.
//!
//! Four independent content areas report when they have finished loading.
//! The store aggregates them into a single "all content loaded" flag and
//! notifies subscribers when anything changes. Updates that do not change
//! a value are no-ops and notify nobody.

use log::debug;
use serde::Serialize;

/// A content area of the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentArea {
    Slider,
    Blogs,
    Announcements,
    Testimonials,
}

impl ContentArea {
    /// All areas, in page order.
    pub const ALL: [ContentArea; 4] = [
        ContentArea::Slider,
        ContentArea::Blogs,
        ContentArea::Announcements,
        ContentArea::Testimonials,
    ];

    /// Area name.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentArea::Slider => "slider",
            ContentArea::Blogs => "blogs",
            ContentArea::Announcements => "announcements",
            ContentArea::Testimonials => "testimonials",
        }
    }
}

/// Aggregated loading state. `true` means the area is still loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingState {
    pub slider: bool,
    pub blogs: bool,
    pub announcements: bool,
    pub testimonials: bool,
    /// Set once no area is loading
    #[serde(rename = "isAllContentLoaded")]
    pub all_content_loaded: bool,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            slider: true,
            blogs: true,
            announcements: true,
            testimonials: true,
            all_content_loaded: false,
        }
    }
}

impl LoadingState {
    /// Whether an area is still loading.
    pub fn is_loading(&self, area: ContentArea) -> bool {
        *self.flag(area)
    }

    fn flag(&self, area: ContentArea) -> &bool {
        match area {
            ContentArea::Slider => &self.slider,
            ContentArea::Blogs => &self.blogs,
            ContentArea::Announcements => &self.announcements,
            ContentArea::Testimonials => &self.testimonials,
        }
    }

    fn flag_mut(&mut self, area: ContentArea) -> &mut bool {
        match area {
            ContentArea::Slider => &mut self.slider,
            ContentArea::Blogs => &mut self.blogs,
            ContentArea::Announcements => &mut self.announcements,
            ContentArea::Testimonials => &mut self.testimonials,
        }
    }
}

/// Handle returned by [`LoadingStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&LoadingState) + Send + Sync>;

/// Owner of the loading state.
///
/// # Example
///
/// ```
/// use cmsrender::store::{ContentArea, LoadingStore};
///
/// let mut store = LoadingStore::new();
/// for area in ContentArea::ALL {
///     store.set_loaded(area, true);
/// }
/// assert!(store.state().all_content_loaded);
/// assert!(!store.set_slider_loaded(true));
/// ```
#[derive(Default)]
pub struct LoadingStore {
    state: LoadingState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl LoadingStore {
    /// Create a store with every area loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LoadingState {
        self.state
    }

    /// Record whether an area has loaded.
    ///
    /// Returns `false` without notifying anyone when the value is unchanged.
    pub fn set_loaded(&mut self, area: ContentArea, loaded: bool) -> bool {
        let loading = !loaded;
        let flag = self.state.flag_mut(area);
        if *flag == loading {
            return false;
        }
        *flag = loading;

        self.state.all_content_loaded = ContentArea::ALL
            .iter()
            .all(|area| !self.state.is_loading(*area));
        debug!(
            "{} loaded={loaded}, all content loaded={}",
            area.as_str(),
            self.state.all_content_loaded
        );

        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
        true
    }

    pub fn set_slider_loaded(&mut self, loaded: bool) -> bool {
        self.set_loaded(ContentArea::Slider, loaded)
    }

    pub fn set_blogs_loaded(&mut self, loaded: bool) -> bool {
        self.set_loaded(ContentArea::Blogs, loaded)
    }

    pub fn set_announcements_loaded(&mut self, loaded: bool) -> bool {
        self.set_loaded(ContentArea::Announcements, loaded)
    }

    pub fn set_testimonials_loaded(&mut self, loaded: bool) -> bool {
        self.set_loaded(ContentArea::Testimonials, loaded)
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&LoadingState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

impl std::fmt::Debug for LoadingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
