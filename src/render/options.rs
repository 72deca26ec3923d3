//! Rendering options and configuration.

use super::CleanupOptions;

/// Text used when a document has no renderable content.
pub const DEFAULT_PLACEHOLDER: &str = "No content available";

/// Options for rendering CMS content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base URL that relative upload paths are resolved against
    pub asset_base_url: Option<String>,

    /// Turn video links into embedded players
    pub embed_videos: bool,

    /// Text of the empty-document placeholder
    pub placeholder_text: String,

    /// Collect rendering statistics
    pub collect_stats: bool,

    /// Text cleanup options for plain-text output
    pub cleanup: Option<CleanupOptions>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset base URL.
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.asset_base_url = if base.is_empty() { None } else { Some(base) };
        self
    }

    /// Enable or disable video embeds.
    pub fn with_embeds(mut self, embed: bool) -> Self {
        self.embed_videos = embed;
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: super::CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_base_url: None,
            embed_videos: true,
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
            collect_stats: false,
            cleanup: None,
        }
    }
}
