//! Domain logic - version records, file formats and the tag catalog

pub mod format;
pub mod tag;
pub mod version;

pub use format::{FormatSpec, FormatTraits};
pub use tag::{LineMatcher, Tag, TagCatalog, TagFormatter, STANDARD_TAGS};
pub use version::VersionProperties;
