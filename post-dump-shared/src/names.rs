//! Reserved taxonomy names and meta keys of the source content store.
//!
//! The translation plugin stores languages and translation groups as ordinary
//! taxonomies; these names are the contract the generator relies on.

/// Taxonomy binding content items to their language.
pub const LANGUAGE: &str = "language";

/// Taxonomy binding terms to their language.
pub const TERM_LANGUAGE: &str = "term_language";

/// Translation groups of content items.
pub const POST_TRANSLATIONS: &str = "post_translations";

/// Translation groups of terms.
pub const TERM_TRANSLATIONS: &str = "term_translations";

/// Prefix the translation plugin gives to term-language slugs.
pub const TERM_LANGUAGE_SLUG_PREFIX: &str = "pll_";

/// Content type of media assets.
pub const ATTACHMENT: &str = "attachment";

/// Meta key linking a content item to its featured image.
pub const THUMBNAIL_META_KEY: &str = "_thumbnail_id";

/// Meta key linking a content item to the item it translates.
pub const TRANSLATION_OF_META_KEY: &str = "_pll_translation_of";

/// Taxonomies that never count as ordinary classification taxonomies.
pub const LANGUAGE_TAXONOMIES: [&str; 4] =
    [LANGUAGE, POST_TRANSLATIONS, TERM_LANGUAGE, TERM_TRANSLATIONS];
