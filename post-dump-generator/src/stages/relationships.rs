//! Language assignments and relationship rows.
//!
//! Every insert here is guarded on both of its endpoints, and skipped outright
//! when an endpoint was never allocated by the script.
use indexmap::IndexMap;
use post_dump_shared::names::POST_TRANSLATIONS;
use post_dump_shared::Row;
use tracing::{debug, info, warn};

use super::Emission;
use crate::codec;
use crate::emitter::Insert;
use crate::extraction::ExportSnapshot;
use crate::script::ScriptBuilder;
use crate::symbols::Symbol;

/// Emits a guarded relationship insert, or a skip comment when `object` or
/// `taxonomy` was never allocated.
fn relationship(
    emission: &mut Emission<'_>,
    out: &mut ScriptBuilder,
    object: &Symbol,
    taxonomy: &Symbol,
    order: String,
) -> bool {
    for endpoint in [object, taxonomy] {
        if !emission.is_bound(endpoint) {
            out.comment(&format!("Skipped: {} is not defined by this script", endpoint));
            return false;
        }
    }
    let object = emission.var(object);
    let taxonomy = emission.var(taxonomy);
    let insert = Insert::new(emission.config.table("term_relationships"))
        .value("object_id", object.clone())
        .value("term_taxonomy_id", taxonomy.clone())
        .value("term_order", order)
        .guard(object)
        .guard(taxonomy);
    out.statement(insert.render(emission.dialect));
    true
}

/// Language of each regular term, read from the term translation groups.
///
/// A term listed in several groups takes the language of the last group
/// scanned.
fn term_language_map(rows: &[Row]) -> IndexMap<u64, String> {
    let mut languages: IndexMap<u64, String> = IndexMap::new();
    for row in rows {
        let Some(term_id) = row.id("old_term_id") else {
            continue;
        };
        let description = row.text("description").unwrap_or_default();
        let map = match codec::decode(description) {
            Ok(map) => map,
            Err(error) => {
                warn!(term_id, error = %error, "Unreadable term translation group");
                continue;
            }
        };
        for (language, member) in map.iter() {
            if member != term_id {
                continue;
            }
            if let Some(previous) = languages.insert(term_id, language.to_string()) {
                if previous != language {
                    warn!(
                        term_id,
                        kept = language,
                        replaced = %previous,
                        "Term appears in several translation groups, keeping the last language"
                    );
                }
            }
        }
    }
    languages
}

pub(super) fn term_languages(
    emission: &mut Emission<'_>,
    snapshot: &ExportSnapshot,
    out: &mut ScriptBuilder,
) {
    if snapshot.plain_taxonomies.is_empty() {
        return;
    }
    if snapshot.term_language_groups.is_empty() {
        warn!("No term translation groups found");
        out.comment("WARNING: No term translation groups found");
    }

    let languages = term_language_map(&snapshot.term_language_groups);
    if languages.is_empty() {
        warn!("No term language mappings found");
        out.comment("WARNING: No term language mappings found");
        out.blank();
        return;
    }

    let mut assigned = 0;
    for (term_id, language) in &languages {
        out.comment(&format!("Assign term {} to language {}", term_id, language));
        let term = Symbol::Term(*term_id);
        let target = Symbol::TermLanguageMapping(language.clone());
        if relationship(emission, out, &term, &target, "0".to_string()) {
            assigned += 1;
        }
    }
    out.blank();
    info!(terms = assigned, "Assigned terms to languages");
}

pub(super) fn item_languages(
    emission: &mut Emission<'_>,
    snapshot: &ExportSnapshot,
    out: &mut ScriptBuilder,
) {
    for row in &snapshot.post_languages {
        let (Some(post_id), Some(language)) = (row.id("old_post_id"), row.text("language_slug")) else {
            continue;
        };
        out.comment(&format!("Assign post {} to language {}", post_id, language));
        let post = Symbol::Post(post_id);
        let target = Symbol::ContentLanguage(language.to_string());
        relationship(emission, out, &post, &target, "0".to_string());
    }
    out.blank();
}

/// Classification and translation-group links of the content items.
pub(super) fn item_terms(emission: &mut Emission<'_>, snapshot: &ExportSnapshot, out: &mut ScriptBuilder) {
    let mut emitted = 0;
    for row in &snapshot.post_relationships {
        let (Some(post_id), Some(taxonomy_id)) = (row.id("old_post_id"), row.id("term_taxonomy_id")) else {
            continue;
        };
        let target = if row.text("taxonomy") == Some(POST_TRANSLATIONS) {
            Symbol::PostGroupTaxonomy(taxonomy_id)
        } else {
            Symbol::TermTaxonomy(taxonomy_id)
        };
        let order = match row.get("term_order") {
            Some(value) if !value.is_null() => emission.literal(value),
            _ => "0".to_string(),
        };
        if relationship(emission, out, &Symbol::Post(post_id), &target, order) {
            emitted += 1;
        }
    }
    out.blank();
    debug!(relationships = emitted, "Emitted post relationships");
}

/// Links between regular terms and their translation groups.
pub(super) fn term_groups(emission: &mut Emission<'_>, snapshot: &ExportSnapshot, out: &mut ScriptBuilder) {
    for row in &snapshot.term_group_relationships {
        let (Some(term_id), Some(taxonomy_id)) = (row.id("old_term_id"), row.id("old_term_taxonomy_id")) else {
            continue;
        };
        relationship(
            emission,
            out,
            &Symbol::Term(term_id),
            &Symbol::TermGroupTaxonomy(taxonomy_id),
            "0".to_string(),
        );
    }
    out.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_language_map_last_group_wins() {
        let rows = vec![
            Row::new()
                .with("old_term_id", 4)
                .with("description", r#"a:2:{s:2:"en";i:4;s:2:"fr";i:5;}"#),
            Row::new()
                .with("old_term_id", 5)
                .with("description", r#"a:2:{s:2:"en";i:4;s:2:"fr";i:5;}"#),
            Row::new()
                .with("old_term_id", 4)
                .with("description", r#"a:1:{s:2:"de";i:4;}"#),
        ];
        let languages = term_language_map(&rows);
        assert_eq!(languages.get(&4).map(String::as_str), Some("de"));
        assert_eq!(languages.get(&5).map(String::as_str), Some("fr"));
    }

    #[test]
    fn test_term_language_map_skips_unreadable_groups() {
        let rows = vec![Row::new().with("old_term_id", 4).with("description", "broken")];
        assert!(term_language_map(&rows).is_empty());
    }
}
