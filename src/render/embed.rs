//! Video embed detection and markup.

use std::sync::OnceLock;

use regex::Regex;

use super::markup::Element;

const YOUTUBE_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";
const VIMEO_ALLOW: &str = "autoplay; fullscreen; picture-in-picture";

/// A supported video host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoHost {
    YouTube,
    Vimeo,
}

impl VideoHost {
    /// Detect the host of a URL.
    pub fn detect(url: &str) -> Option<Self> {
        if youtube_host().is_match(url) {
            Some(VideoHost::YouTube)
        } else if vimeo_host().is_match(url) {
            Some(VideoHost::Vimeo)
        } else {
            None
        }
    }

    /// Extract the video ID from a URL of this host.
    pub fn video_id(self, url: &str) -> Option<String> {
        let captures = match self {
            VideoHost::YouTube => youtube_id()
                .captures(url)
                .or_else(|| youtube_query_id().captures(url)),
            VideoHost::Vimeo => vimeo_id().captures(url),
        }?;
        captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .filter(|id| !id.is_empty())
    }

    /// Player URL for a video ID.
    pub fn embed_url(self, id: &str) -> String {
        match self {
            VideoHost::YouTube => format!("https://www.youtube.com/embed/{id}"),
            VideoHost::Vimeo => format!("https://player.vimeo.com/video/{id}"),
        }
    }

    /// Human-readable host name.
    pub fn name(self) -> &'static str {
        match self {
            VideoHost::YouTube => "YouTube",
            VideoHost::Vimeo => "Vimeo",
        }
    }

    fn allow(self) -> &'static str {
        match self {
            VideoHost::YouTube => YOUTUBE_ALLOW,
            VideoHost::Vimeo => VIMEO_ALLOW,
        }
    }
}

fn youtube_host() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:youtube\.com|youtu\.be)").expect("valid pattern"))
}

fn youtube_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)([^&\n?#]+)",
        )
        .expect("valid pattern")
    })
}

fn youtube_query_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("valid pattern"))
}

fn vimeo_host() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)vimeo\.com/").expect("valid pattern"))
}

fn vimeo_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("valid pattern"))
}

/// Check whether a URL points at a supported video host.
pub fn is_video_url(url: &str) -> bool {
    VideoHost::detect(url).is_some()
}

/// Extract a video ID from any supported URL.
pub fn video_id(url: &str) -> Option<String> {
    VideoHost::detect(url)?.video_id(url)
}

/// Player URL for any supported video URL.
pub fn embed_url(url: &str) -> Option<String> {
    let host = VideoHost::detect(url)?;
    host.video_id(url).map(|id| host.embed_url(&id))
}

/// Build the responsive embed block for a video URL.
///
/// Returns `None` when the host is unknown or no ID can be extracted; callers
/// fall back to a plain anchor. An empty `title` uses the host's player name.
pub fn embed_block(url: &str, title: &str) -> Option<Element> {
    let host = VideoHost::detect(url)?;
    let id = host.video_id(url)?;

    let iframe = Element::new("iframe")
        .attr("src", host.embed_url(&id))
        .attr(
            "title",
            if title.trim().is_empty() {
                format!("{} video player", host.name())
            } else {
                title.to_string()
            },
        )
        .attr("frameborder", "0")
        .attr("allow", host.allow())
        .attr("allowfullscreen", "")
        .attr("loading", "lazy")
        .class("absolute top-0 left-0 w-full h-full");

    Some(
        Element::new("div").class("relative w-full my-6").child(
            Element::new("div")
                .class("relative w-full pb-[56.25%] h-0 overflow-hidden rounded-lg shadow-lg")
                .child(iframe),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_ids() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://youtu.be/abc123", "abc123"),
            ("https://youtube.com/embed/xyz?start=4", "xyz"),
            ("https://youtube.com/shorts/s1", "s1"),
            ("https://www.youtube.com/watch?feature=share&v=q9", "q9"),
        ];
        for (url, id) in cases {
            assert_eq!(video_id(url).as_deref(), Some(id), "{url}");
        }
    }

    #[test]
    fn test_vimeo() {
        assert_eq!(VideoHost::detect("https://vimeo.com/76979871"), Some(VideoHost::Vimeo));
        assert_eq!(
            embed_url("https://vimeo.com/video/76979871").as_deref(),
            Some("https://player.vimeo.com/video/76979871")
        );
    }

    #[test]
    fn test_not_video() {
        assert!(!is_video_url("https://example.com/watch?v=1"));
        assert!(embed_block("https://example.com", "").is_none());
    }

    #[test]
    fn test_missing_id_has_no_block() {
        assert!(is_video_url("https://www.youtube.com/"));
        assert!(embed_block("https://www.youtube.com/", "").is_none());
    }

    #[test]
    fn test_embed_block_shape() {
        let block = embed_block("https://youtu.be/abc123", "Campus tour").unwrap();
        assert!(block.has_class("my-6"));
        let wrapper = block.children[0].as_element().unwrap();
        let iframe = wrapper.children[0].as_element().unwrap();
        assert_eq!(iframe.tag, "iframe");
        assert_eq!(
            iframe.get_attr("src"),
            Some("https://www.youtube.com/embed/abc123")
        );
        assert_eq!(iframe.get_attr("loading"), Some("lazy"));
        assert_eq!(iframe.get_attr("title"), Some("Campus tour"));
    }
}
