//! Header, cleanup, language mapping and footer.
use post_dump_shared::names::{LANGUAGE, TERM_LANGUAGE, TERM_LANGUAGE_SLUG_PREFIX};
use tracing::{debug, info};

use super::Emission;
use crate::extraction::ExportSnapshot;
use crate::script::ScriptBuilder;
use crate::symbols::{Binding, Symbol};

pub(super) fn header(emission: &mut Emission<'_>, out: &mut ScriptBuilder) {
    let database = if emission.config.database_name.is_empty() {
        "(unknown)"
    } else {
        emission.config.database_name.as_str()
    };
    out.comment("Post Type Export with New IDs (translation groups preserved)");
    out.comment(&format!("Post Type: {}", emission.content_type));
    out.comment(&format!(
        "Generated: {}",
        emission.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.comment(&format!("Database: {}", database));
    out.comment("");
    out.blank();
    for directive in emission.dialect.preamble() {
        out.statement(directive);
    }
    out.blank();
}

/// Removes every item of the type, and the terms of its taxonomies, from the
/// destination before the copy is inserted.
pub(super) fn cleanup(emission: &mut Emission<'_>, snapshot: &ExportSnapshot, out: &mut ScriptBuilder) {
    let posts = emission.table("posts");
    let postmeta = emission.table("postmeta");
    let terms = emission.table("terms");
    let term_taxonomy = emission.table("term_taxonomy");
    let content_type = emission.text(emission.content_type.as_str());

    out.comment("Store post IDs to delete in a temporary table");
    out.statement("CREATE TEMPORARY TABLE IF NOT EXISTS temp_posts_to_delete (post_id BIGINT UNSIGNED);");
    out.statement(format!(
        "INSERT INTO temp_posts_to_delete (post_id) SELECT ID FROM {} WHERE post_type = {};",
        posts, content_type
    ));
    out.blank();

    let taxonomies = &snapshot.cleanup_taxonomies;
    if !taxonomies.is_empty() {
        let list = taxonomies
            .iter()
            .map(|taxonomy| emission.text(taxonomy))
            .collect::<Vec<_>>()
            .join(", ");
        out.comment(&format!(
            "Store all terms from taxonomies linked to post type: {}",
            taxonomies.join(", ")
        ));
        out.statement(
            "CREATE TEMPORARY TABLE IF NOT EXISTS temp_taxonomies_to_delete (\n  \
             term_taxonomy_id BIGINT UNSIGNED,\n  \
             term_id BIGINT UNSIGNED,\n  \
             taxonomy VARCHAR(32)\n\
             );",
        );
        out.blank();
        out.comment("Collect every term_taxonomy row of those taxonomies");
        out.statement(format!(
            "INSERT INTO temp_taxonomies_to_delete (term_taxonomy_id, term_id, taxonomy)\n\
             SELECT tt.term_taxonomy_id, tt.term_id, tt.taxonomy\n\
             FROM {} tt\n\
             WHERE tt.taxonomy IN ({});",
            term_taxonomy, list
        ));
        out.blank();
        out.comment("Delete term relationships for these posts");
        out.statement(format!(
            "DELETE FROM {} WHERE object_id IN (SELECT post_id FROM temp_posts_to_delete);",
            emission.table("term_relationships")
        ));
        out.blank();
        out.comment("Delete termmeta for terms that will be deleted");
        out.statement(format!(
            "DELETE FROM {} WHERE term_id IN (SELECT term_id FROM temp_taxonomies_to_delete);",
            emission.table("termmeta")
        ));
        out.blank();
        out.comment("Delete term_taxonomy entries for these taxonomies");
        out.statement(format!(
            "DELETE FROM {} WHERE term_taxonomy_id IN (SELECT term_taxonomy_id FROM temp_taxonomies_to_delete);",
            term_taxonomy
        ));
        out.blank();
        out.comment("Delete the terms themselves");
        out.statement(format!(
            "DELETE FROM {} WHERE term_id IN (SELECT term_id FROM temp_taxonomies_to_delete);",
            terms
        ));
        out.blank();
        out.statement("DROP TEMPORARY TABLE IF EXISTS temp_taxonomies_to_delete;");
        out.blank();
    }

    out.comment("Delete postmeta for these posts");
    out.statement(format!(
        "DELETE FROM {} WHERE post_id IN (SELECT post_id FROM temp_posts_to_delete);",
        postmeta
    ));
    out.blank();
    out.comment("Delete the posts themselves");
    out.statement(format!("DELETE FROM {} WHERE post_type = {};", posts, content_type));
    out.blank();
    out.comment("Clean up remaining orphaned terms with no taxonomy rows");
    out.statement(format!(
        "DELETE t FROM {} t\nLEFT JOIN {} tt ON t.term_id = tt.term_id\nWHERE tt.term_id IS NULL;",
        terms, term_taxonomy
    ));
    out.blank();
    out.statement("DROP TEMPORARY TABLE IF EXISTS temp_posts_to_delete;");
    out.blank();

    debug!(
        content_type = %emission.content_type,
        taxonomies = taxonomies.len(),
        "Emitted cleanup"
    );
}

fn language_lookup(emission: &Emission<'_>, taxonomy: &str, slug: &str) -> String {
    format!(
        "(\n  SELECT tt.term_taxonomy_id\n  FROM {} tt\n  INNER JOIN {} t ON tt.term_id = t.term_id\n  \
         WHERE tt.taxonomy = {} AND t.slug = {}\n  LIMIT 1\n)",
        emission.table("term_taxonomy"),
        emission.table("terms"),
        emission.text(taxonomy),
        emission.text(slug)
    )
}

/// Resolves every source language against the destination at replay.
///
/// The term-language row is looked up by slug, then by the prefixed slug, and
/// falls back to the content-language row.
pub(super) fn language_map(
    emission: &mut Emission<'_>,
    snapshot: &ExportSnapshot,
    out: &mut ScriptBuilder,
) {
    if snapshot.language_slugs.is_empty() {
        return;
    }
    out.comment("Map language slugs to the destination term_taxonomy ids");
    for slug in &snapshot.language_slugs {
        let content_language = Symbol::ContentLanguage(slug.clone());
        let term_language = Symbol::TermLanguageMapping(slug.clone());
        if emission.is_bound(&content_language) {
            continue;
        }

        let lookup = language_lookup(emission, LANGUAGE, slug);
        let content_var = emission.var(&content_language);
        out.statement(emission.dialect.assign(&content_var, &lookup));

        let term_var = emission.var(&term_language);
        let lookup = language_lookup(emission, TERM_LANGUAGE, slug);
        out.statement(emission.dialect.assign(&term_var, &lookup));

        let prefixed = format!("{}{}", TERM_LANGUAGE_SLUG_PREFIX, slug);
        let lookup = language_lookup(emission, TERM_LANGUAGE, &prefixed);
        out.statement(
            emission
                .dialect
                .assign(&term_var, &emission.dialect.if_null(&term_var, &lookup)),
        );
        out.statement(
            emission
                .dialect
                .assign(&term_var, &emission.dialect.if_null(&term_var, &content_var)),
        );

        emission.symbols.bind(content_language, Binding::Conditional);
        emission.symbols.bind(term_language, Binding::Conditional);
    }
    out.blank();
    info!(languages = ?snapshot.language_slugs, "Mapped languages");
}

pub(super) fn footer(emission: &mut Emission<'_>, out: &mut ScriptBuilder) {
    out.blank();
    for directive in emission.dialect.epilogue() {
        out.statement(directive);
    }
}
