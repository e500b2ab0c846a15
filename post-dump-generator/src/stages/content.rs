//! Content items, featured images and their metadata.
use std::collections::HashMap;

use post_dump_shared::names::{THUMBNAIL_META_KEY, TRANSLATION_OF_META_KEY};
use post_dump_shared::Row;
use tracing::{debug, info, warn};

use super::Emission;
use crate::emitter::RowPlan;
use crate::extraction::ExportSnapshot;
use crate::script::ScriptBuilder;
use crate::symbols::Symbol;

/// Orders items so each comes after its parent when the parent is exported.
///
/// Items keep id order otherwise. A parent cycle is broken at the item first
/// reached in id order, whose parent reference then renders as the default.
fn parents_first(rows: &[Row]) -> Vec<&Row> {
    let index: HashMap<u64, usize> = rows
        .iter()
        .enumerate()
        .filter_map(|(position, row)| row.id("ID").map(|id| (id, position)))
        .collect();
    let mut visited = vec![false; rows.len()];
    let mut ordered = Vec::with_capacity(rows.len());

    for start in 0..rows.len() {
        let mut chain = Vec::new();
        let mut cursor = Some(start);
        while let Some(position) = cursor {
            if visited[position] {
                break;
            }
            visited[position] = true;
            chain.push(position);
            cursor = rows[position]
                .id("post_parent")
                .and_then(|parent| index.get(&parent).copied());
        }
        ordered.extend(chain.into_iter().rev().map(|position| &rows[position]));
    }
    ordered
}

pub(super) fn items(emission: &mut Emission<'_>, snapshot: &ExportSnapshot, out: &mut ScriptBuilder) {
    let plan = RowPlan::dropping(&["ID", "post_language"]).reference("post_parent", Symbol::Post);
    let mut emitted = 0;

    for row in parents_first(&snapshot.posts) {
        let Some(old_id) = row.id("ID") else {
            continue;
        };
        let symbol = Symbol::Post(old_id);
        if emission.is_bound(&symbol) {
            continue;
        }
        let insert = emission.insert_row("posts", row, &plan);
        out.statement(insert.render(emission.dialect));
        out.statement(emission.capture(symbol, None));

        let language = row.text("post_language");
        if let Some(language) = language {
            out.statement(emission.assign_text(Symbol::PostLanguage(old_id), language));
        }
        out.blank();
        emitted += 1;
        debug!(post_id = old_id, language = language.unwrap_or("none"), "Mapped post");
    }

    info!(
        content_type = %emission.content_type,
        posts = emitted,
        "Emitted content items"
    );
}

pub(super) fn attachments(
    emission: &mut Emission<'_>,
    snapshot: &ExportSnapshot,
    out: &mut ScriptBuilder,
) {
    let plan = RowPlan::dropping(&["ID"]).reference("post_parent", Symbol::Post);
    let mut emitted = 0;

    for row in &snapshot.attachments {
        let Some(old_id) = row.id("ID") else {
            continue;
        };
        let symbol = Symbol::Attachment(old_id);
        if emission.is_bound(&symbol) {
            continue;
        }
        let insert = emission.insert_row("posts", row, &plan);
        out.statement(insert.render(emission.dialect));
        out.statement(emission.capture(symbol, None));
        out.blank();
        emitted += 1;
        debug!(attachment_id = old_id, "Mapped attachment");
    }

    if emitted > 0 {
        info!(attachments = emitted, "Emitted featured images");
    }
}

pub(super) fn attachment_meta(
    emission: &mut Emission<'_>,
    snapshot: &ExportSnapshot,
    out: &mut ScriptBuilder,
) {
    for row in &snapshot.attachment_meta {
        let Some(old_id) = row.id("old_attachment_id") else {
            continue;
        };
        let owner = Symbol::Attachment(old_id);
        if !emission.is_bound(&owner) {
            out.comment(&format!(
                "Skipped: meta {} of attachment {} which is not exported",
                row.get("meta_id").map(ToString::to_string).unwrap_or_default(),
                old_id
            ));
            continue;
        }
        let owner = emission.var(&owner);
        let key = emission.column_literal(row, "meta_key");
        let value = emission.column_literal(row, "meta_value");
        let insert = emission.meta_insert("postmeta", "post_id", owner, key, value);
        out.statement(insert.render(emission.dialect));
    }
    out.blank();
}

/// Content metadata. Featured-image and translation-source keys are remapped
/// to the destination ids of the rows they point at.
pub(super) fn item_meta(emission: &mut Emission<'_>, snapshot: &ExportSnapshot, out: &mut ScriptBuilder) {
    for row in &snapshot.post_meta {
        let Some(old_id) = row.id("old_post_id") else {
            warn!("Skipping post meta row without owner");
            continue;
        };
        let owner = Symbol::Post(old_id);
        if !emission.is_bound(&owner) {
            out.comment(&format!("Skipped: meta of post {} which is not exported", old_id));
            continue;
        }
        let owner = emission.var(&owner);
        let remapped = match (row.text("meta_key"), row.get("meta_value").and_then(|v| v.as_id())) {
            (Some(THUMBNAIL_META_KEY), Some(id)) => Some(Symbol::Attachment(id)),
            (Some(TRANSLATION_OF_META_KEY), Some(id)) => Some(Symbol::Post(id)),
            _ => None,
        };
        let key = emission.column_literal(row, "meta_key");
        let value = match remapped {
            Some(target) => emission.reference(&target, "0"),
            None => emission.column_literal(row, "meta_value"),
        };
        let insert = emission.meta_insert("postmeta", "post_id", owner, key, value);
        out.statement(insert.render(emission.dialect));
    }
    out.blank();
}
