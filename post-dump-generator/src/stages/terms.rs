//! Translation-group terms, regular terms, their taxonomy rows and metadata.
use post_dump_shared::Row;
use tracing::{debug, info, warn};

use super::Emission;
use crate::emitter::RowPlan;
use crate::extraction::ExportSnapshot;
use crate::reassembler::GroupKind;
use crate::script::ScriptBuilder;
use crate::symbols::Symbol;

/// Terms backing the translation groups of `kind`.
pub(super) fn group_terms(
    emission: &mut Emission<'_>,
    rows: &[Row],
    kind: GroupKind,
    out: &mut ScriptBuilder,
) {
    let plan = RowPlan::dropping(&["term_id", "term_order"]);
    for row in rows {
        let Some(old_id) = row.id("term_id") else {
            continue;
        };
        let symbol = kind.group_term(old_id);
        if emission.is_bound(&symbol) {
            continue;
        }
        let insert = emission.insert_row("terms", row, &plan);
        out.statement(insert.render(emission.dialect));
        out.statement(emission.capture(symbol, None));
        out.blank();
    }
}

/// Taxonomy rows of the translation groups of `kind`.
///
/// Descriptions are captured for the backfill and written empty here, since
/// they name members that may not exist yet.
pub(super) fn group_taxonomy(
    emission: &mut Emission<'_>,
    rows: &[Row],
    kind: GroupKind,
    out: &mut ScriptBuilder,
) {
    for row in rows {
        let (Some(old_id), Some(old_term_id)) = (row.id("term_taxonomy_id"), row.id("term_id")) else {
            continue;
        };
        let symbol = kind.group_taxonomy(old_id);
        if emission.is_bound(&symbol) {
            continue;
        }

        let description = row.text("description").unwrap_or_default();
        if let Err(error) = emission.groups_mut(kind).capture(old_term_id, description) {
            warn!(
                group = old_term_id,
                taxonomy = kind.taxonomy(),
                error = %error,
                "Unreadable translation group description"
            );
            out.comment(&format!(
                "WARNING: {} {} has an unreadable description ({}) and is not remapped",
                kind.label(),
                old_term_id,
                error
            ));
        }

        let owner = kind.group_term(old_term_id);
        if !emission.is_bound(&owner) {
            out.comment(&format!(
                "Skipped: term_taxonomy {} of group term {} which is not exported",
                old_id, old_term_id
            ));
            continue;
        }
        let owner = emission.var(&owner);
        let plan = RowPlan::dropping(&["term_taxonomy_id"])
            .lead("term_id", owner)
            .replace("description", emission.text(""))
            .reference("parent", kind.group_term_ctor());
        let insert = emission.insert_row("term_taxonomy", row, &plan);
        out.statement(insert.render(emission.dialect));
        out.statement(emission.capture(symbol, None));
        out.blank();
    }
}

pub(super) fn plain_terms(emission: &mut Emission<'_>, snapshot: &ExportSnapshot, out: &mut ScriptBuilder) {
    if snapshot.plain_taxonomies.is_empty() {
        return;
    }
    info!(taxonomies = %snapshot.plain_taxonomies.join(", "), "Found taxonomies");

    let plan = RowPlan::dropping(&["term_id", "term_language", "term_order"]);
    for row in &snapshot.plain_terms {
        let Some(old_id) = row.id("term_id") else {
            continue;
        };
        let symbol = Symbol::Term(old_id);
        if emission.is_bound(&symbol) {
            continue;
        }
        let insert = emission.insert_row("terms", row, &plan);
        out.statement(insert.render(emission.dialect));
        out.statement(emission.capture(symbol, None));
        if let Some(language) = row.text("term_language") {
            out.statement(emission.assign_text(Symbol::TermLanguage(old_id), language));
        }
        out.blank();
    }
}

/// Taxonomy rows of regular terms. Each insert is guarded on its term, so the
/// captured id is null when the term is missing at replay.
pub(super) fn plain_taxonomy(
    emission: &mut Emission<'_>,
    snapshot: &ExportSnapshot,
    out: &mut ScriptBuilder,
) {
    let mut emitted = 0;
    for row in &snapshot.plain_term_taxonomy {
        let (Some(old_id), Some(old_term_id)) = (row.id("term_taxonomy_id"), row.id("term_id")) else {
            continue;
        };
        let symbol = Symbol::TermTaxonomy(old_id);
        if emission.is_bound(&symbol) {
            continue;
        }
        out.comment(&format!(
            "term_taxonomy_id: {}, term_id: {}, taxonomy: {}",
            old_id,
            old_term_id,
            row.text("taxonomy").unwrap_or_default()
        ));

        let owner = Symbol::Term(old_term_id);
        if !emission.is_bound(&owner) {
            out.comment(&format!("Skipped: term {} is not exported", old_term_id));
            out.blank();
            continue;
        }
        let owner_var = emission.var(&owner);
        let plan = RowPlan::dropping(&["term_taxonomy_id"])
            .lead("term_id", owner_var.clone())
            .reference("parent", Symbol::Term);
        let insert = emission.insert_row("term_taxonomy", row, &plan).guard(owner_var);
        out.statement(insert.render(emission.dialect));
        out.statement(emission.capture(symbol, Some(&owner)));
        out.blank();
        emitted += 1;
    }
    if !snapshot.plain_taxonomies.is_empty() {
        info!(rows = emitted, "Emitted term_taxonomy rows");
    }
}

pub(super) fn term_meta(emission: &mut Emission<'_>, snapshot: &ExportSnapshot, out: &mut ScriptBuilder) {
    for row in &snapshot.term_meta {
        let Some(old_term_id) = row.id("old_term_id") else {
            continue;
        };
        let owner = Symbol::Term(old_term_id);
        if !emission.is_bound(&owner) {
            debug!(term_id = old_term_id, "Skipping meta of unexported term");
            out.comment(&format!("Skipped: meta of term {} which is not exported", old_term_id));
            continue;
        }
        let owner = emission.var(&owner);
        let key = emission.column_literal(row, "meta_key");
        let value = emission.column_literal(row, "meta_value");
        let insert = emission.meta_insert("termmeta", "term_id", owner, key, value);
        out.statement(insert.render(emission.dialect));
    }
    out.blank();
}
