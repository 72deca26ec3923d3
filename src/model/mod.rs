//! Content model types.
//!
//! This module defines the rich-text document tree produced by the CMS
//! editor and the canonical page shape produced by the normalizer. Both are
//! independent of how they are rendered.

mod node;
mod page;
mod table;

pub(crate) use node::dimension;
pub use node::{
    DocumentNode, HeadingTag, LinkKind, ListType, RichText, RootNode, TextFormat, UploadValue,
};
pub use page::{
    canonical_url, format_slug_for_display, is_valid_slug, Breadcrumb, ContentType, MediaRef,
    PageSection, PageSource, PageType, SeoData, SeoMetadata, UnifiedPageResponse,
    GLOBAL_PAGE_PRIORITY,
};
pub use table::{
    DynamicTableConfig, LinkRow, MultipleTableConfig, TableCell, TableColumn, TableRow,
    TableVariant,
};
