//! URL detection inside text runs and link styling.

use std::sync::OnceLock;

use regex::Regex;

use super::markup::{Element, Markup};

/// Characters stripped from the end of a detected URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

const DOWNLOAD_ICON_PATH: &str = "M3 17a1 1 0 011-1h12a1 1 0 110 2H4a1 1 0 01-1-1zm3.293-7.707a1 1 0 011.414 0L9 10.586V3a1 1 0 112 0v7.586l1.293-1.293a1 1 0 111.414 1.414l-3 3a1 1 0 01-1.414 0l-3-3a1 1 0 010-1.414z";
const EXTERNAL_ICON_PATH: &str = "M10 6H6a2 2 0 00-2 2v10a2 2 0 002 2h10a2 2 0 002-2v-4M14 4h6m0 0v6m0-6L10 14";

/// Matches `http(s)://` URLs up to whitespace, quotes, brackets, braces,
/// `|`, `\`, `^` or a backtick.
fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"https?://[^\s<>"\[\]{}|\\^`]+"#).expect("valid pattern")
    })
}

/// A piece of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSegment<'a> {
    /// Ordinary text
    Literal(&'a str),
    /// A detected URL
    Url(&'a str),
}

impl<'a> TextSegment<'a> {
    /// The text of the segment.
    pub fn as_str(&self) -> &'a str {
        match self {
            TextSegment::Literal(s) | TextSegment::Url(s) => s,
        }
    }

    /// Check if this segment is a URL.
    pub fn is_url(&self) -> bool {
        matches!(self, TextSegment::Url(_))
    }
}

/// Split text into literal and URL segments.
///
/// Trailing sentence punctuation stays in the following literal segment, so
/// joining the segments always reproduces `text`.
pub fn split_urls(text: &str) -> Vec<TextSegment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in url_regex().find_iter(text) {
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if !has_host(url) {
            continue;
        }
        if m.start() > last {
            segments.push(TextSegment::Literal(&text[last..m.start()]));
        }
        let end = m.start() + url.len();
        segments.push(TextSegment::Url(&text[m.start()..end]));
        last = end;
    }

    if last < text.len() {
        segments.push(TextSegment::Literal(&text[last..]));
    }
    segments
}

/// Every URL found in `text`, in order.
pub fn find_urls(text: &str) -> Vec<&str> {
    split_urls(text)
        .into_iter()
        .filter_map(|s| match s {
            TextSegment::Url(url) => Some(url),
            TextSegment::Literal(_) => None,
        })
        .collect()
}

/// The URL, if the whole (trimmed) text is a single URL.
pub fn whole_url(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    match split_urls(trimmed).as_slice() {
        [TextSegment::Url(url)] => Some(url),
        _ => None,
    }
}

fn has_host(url: &str) -> bool {
    url.find("://").map_or(false, |idx| url.len() > idx + 3)
}

/// Check whether a URL points at a PDF document.
///
/// The path must end in `.pdf` (any case); query and fragment are ignored.
pub fn is_pdf_link(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.to_ascii_lowercase().ends_with(".pdf")
}

/// Colour scheme for anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPalette {
    /// Blue links in running text
    #[default]
    Prose,
    /// Purple links in tables
    Table,
}

impl LinkPalette {
    fn colour(self) -> &'static str {
        match self {
            LinkPalette::Prose => "text-blue-600 hover:text-blue-800",
            LinkPalette::Table => "text-[#6A1B9A] hover:text-[#4B116B]",
        }
    }

    fn decoration(self) -> &'static str {
        match self {
            LinkPalette::Prose => "underline font-medium transition-colors duration-200 hover:no-underline hover:bg-opacity-10 hover:bg-current px-1 py-0.5 rounded inline-flex items-center gap-1",
            LinkPalette::Table => "underline transition-colors inline-flex items-center gap-1",
        }
    }
}

/// Presentation of a styled anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorStyle {
    pub palette: LinkPalette,
    /// Open in a new tab with `rel="noopener noreferrer"`
    pub new_tab: bool,
    /// Append the external-link icon
    pub external_icon: bool,
    /// Title non-PDF links "Open link"
    pub open_title: bool,
}

impl AnchorStyle {
    /// A URL detected in free text: new tab, icon, titled.
    pub fn detected(palette: LinkPalette) -> Self {
        Self {
            palette,
            new_tab: true,
            external_icon: true,
            open_title: true,
        }
    }

    /// An authored table link; only external links leave the site.
    pub fn authored(external: bool) -> Self {
        Self {
            palette: LinkPalette::Table,
            new_tab: external,
            external_icon: external,
            open_title: false,
        }
    }
}

/// Build an anchor for a detected or explicit URL.
///
/// PDF links get the red download treatment and the "Download PDF" title.
pub fn styled_anchor(href: &str, label: impl Into<String>, style: AnchorStyle) -> Element {
    let pdf = is_pdf_link(href);
    let colour = if pdf {
        "text-red-600 hover:text-red-800"
    } else {
        style.palette.colour()
    };

    let mut anchor = Element::new("a")
        .attr("href", href)
        .class(format!("{colour} {}", style.palette.decoration()));
    anchor = if style.new_tab {
        anchor
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
    } else {
        anchor.attr("target", "_self")
    };
    if pdf {
        anchor = anchor.attr("title", "Download PDF").child(download_icon());
    } else if style.open_title {
        anchor = anchor.attr("title", "Open link");
    }

    anchor = anchor.text(label);
    if style.external_icon {
        anchor = anchor.child(external_icon());
    }
    anchor
}

/// A plain external anchor as used for authored links.
pub fn external_anchor(href: &str, label: impl Into<String>) -> Element {
    Element::new("a")
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .class("text-blue-600 hover:text-blue-800 underline font-medium transition-colors duration-200 hover:no-underline hover:bg-blue-50 px-1 py-0.5 rounded")
        .text(label)
}

/// Render text with every detected URL turned into an anchor.
///
/// Literal segments are wrapped by `wrap_literal` (e.g. to apply formatting
/// classes); `None` leaves them as bare text.
pub fn linkify(
    text: &str,
    palette: LinkPalette,
    wrap_literal: Option<&dyn Fn(&str) -> Markup>,
) -> Vec<Markup> {
    split_urls(text)
        .into_iter()
        .filter(|s| !s.as_str().is_empty())
        .map(|segment| match segment {
            TextSegment::Url(url) => {
                styled_anchor(url, url, AnchorStyle::detected(palette)).into()
            }
            TextSegment::Literal(literal) => match wrap_literal {
                Some(wrap) => wrap(literal),
                None => Markup::text(literal),
            },
        })
        .collect()
}

fn download_icon() -> Element {
    Element::new("svg")
        .class("w-3 h-3")
        .attr("fill", "currentColor")
        .attr("viewBox", "0 0 20 20")
        .attr("aria-hidden", "true")
        .child(
            Element::new("path")
                .attr("fill-rule", "evenodd")
                .attr("d", DOWNLOAD_ICON_PATH)
                .attr("clip-rule", "evenodd"),
        )
}

fn external_icon() -> Element {
    Element::new("svg")
        .class("w-3 h-3")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .attr("viewBox", "0 0 24 24")
        .attr("aria-hidden", "true")
        .child(
            Element::new("path")
                .attr("stroke-linecap", "round")
                .attr("stroke-linejoin", "round")
                .attr("stroke-width", "2")
                .attr("d", EXTERNAL_ICON_PATH),
        )
}
