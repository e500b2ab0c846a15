//! Codec for the legacy serialized map stored in translation-group descriptions.
mod legacy_array;

pub use legacy_array::{decode, encode, template, Segment, TranslationMap};
