//! Visitor pattern for customizing rich-text rendering.
//!
//! The visitor pattern allows users to customize how individual nodes are
//! rendered without modifying the core rendering logic.
//!
//! # Example
//!
//! ```
//! use cmsrender::render::visitor::{NodeVisitor, VisitorAction};
//! use cmsrender::render::Markup;
//!
//! struct NoLinksVisitor;
//!
//! impl NodeVisitor for NoLinksVisitor {
//!     fn visit_link(&mut self, _url: &str, text: &str) -> VisitorAction {
//!         // Keep the label, drop the anchor
//!         VisitorAction::Replace(Markup::text(text))
//!     }
//! }
//! ```

use crate::model::{HeadingTag, UploadValue};

use super::markup::{Element, Markup};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the node with custom markup.
    Replace(Markup),

    /// Skip this node entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the node should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement markup.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement markup if available.
    pub fn replacement(&self) -> Option<&Markup> {
        match self {
            VisitorAction::Replace(m) => Some(m),
            _ => None,
        }
    }
}

/// Trait for visiting document nodes during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait NodeVisitor: Send + Sync {
    /// Called before rendering a heading.
    ///
    /// # Arguments
    /// * `text` - The heading text content
    /// * `level` - Heading level (1-6)
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        let _ = (text, level);
        VisitorAction::Continue
    }

    /// Called before rendering an anchor for an authored link.
    fn visit_link(&mut self, url: &str, text: &str) -> VisitorAction {
        let _ = (url, text);
        VisitorAction::Continue
    }

    /// Called before rendering a video embed.
    fn visit_embed(&mut self, url: &str) -> VisitorAction {
        let _ = url;
        VisitorAction::Continue
    }

    /// Called before rendering an uploaded image.
    fn visit_image(&mut self, upload: &UploadValue) -> VisitorAction {
        let _ = upload;
        VisitorAction::Continue
    }

    /// Called before rendering a node of unrecognized type.
    ///
    /// # Arguments
    /// * `kind` - The node's `type` field as found in the input
    fn visit_unknown(&mut self, kind: &str) -> VisitorAction {
        let _ = kind;
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl NodeVisitor for DefaultVisitor {}

/// Visitor that skips all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl NodeVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _upload: &UploadValue) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that caps heading depth: headings deeper than the limit are
/// rendered at the limit.
#[derive(Debug, Clone)]
pub struct MaxHeadingDepthVisitor {
    max_level: u8,
}

impl MaxHeadingDepthVisitor {
    /// Create a visitor that limits headings to the specified max level.
    pub fn new(max_level: u8) -> Self {
        Self {
            max_level: max_level.clamp(1, 6),
        }
    }
}

impl NodeVisitor for MaxHeadingDepthVisitor {
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        if level <= self.max_level {
            return VisitorAction::Continue;
        }
        let tag = HeadingTag::from_level(self.max_level);
        VisitorAction::Replace(
            Element::new(tag.as_str())
                .class(super::html::heading_classes(tag))
                .text(text)
                .into(),
        )
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn NodeVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut visit: impl FnMut(&mut dyn NodeVisitor) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visit(visitor.as_mut());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeVisitor for CompositeVisitor {
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        self.first_action(|v| v.visit_heading(text, level))
    }

    fn visit_link(&mut self, url: &str, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_link(url, text))
    }

    fn visit_embed(&mut self, url: &str) -> VisitorAction {
        self.first_action(|v| v.visit_embed(url))
    }

    fn visit_image(&mut self, upload: &UploadValue) -> VisitorAction {
        self.first_action(|v| v.visit_image(upload))
    }

    fn visit_unknown(&mut self, kind: &str) -> VisitorAction {
        self.first_action(|v| v.visit_unknown(kind))
    }
}
