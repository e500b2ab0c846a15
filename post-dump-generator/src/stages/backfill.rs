//! Rewrites translation-group descriptions with destination ids.
use tracing::{debug, info};

use super::Emission;
use crate::codec::Segment;
use crate::reassembler::{self, GroupKind};
use crate::script::ScriptBuilder;

pub(super) fn groups(emission: &mut Emission<'_>, kind: GroupKind, out: &mut ScriptBuilder) {
    let groups = std::mem::take(emission.groups_mut(kind));
    let mut updated = 0;

    for (group_term_id, map) in groups.iter() {
        out.comment(&format!(
            "{} {}: {}",
            kind.label(),
            group_term_id,
            reassembler::group_json(map)
        ));

        let target = kind.group_term(group_term_id);
        if !emission.is_bound(&target) {
            out.comment(&format!("Skipped: group term {} is not exported", group_term_id));
            out.blank();
            continue;
        }

        let members = reassembler::allocated_members(map, kind, &emission.symbols);
        if members.len() < map.len() {
            debug!(
                group = group_term_id,
                dropped = map.len() - members.len(),
                "Dropping unexported group members"
            );
        }
        if members.is_empty() {
            out.comment("Skipped: no member of this group is exported");
            out.blank();
            continue;
        }

        let parts: Vec<String> = reassembler::description_template(&members, kind)
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => emission.text(&text),
                Segment::Value(member) => emission.reference(&member, "0"),
            })
            .collect();
        let description = emission.dialect.concat(&parts);
        let target = emission.var(&target);
        out.statement(format!(
            "UPDATE {} SET {} = {} WHERE {} = {} AND {} = {};",
            emission.table("term_taxonomy"),
            emission.ident("description"),
            description,
            emission.ident("term_id"),
            target,
            emission.ident("taxonomy"),
            emission.text(kind.taxonomy())
        ));
        out.blank();
        updated += 1;
    }

    if updated > 0 {
        info!(groups = updated, taxonomy = kind.taxonomy(), "Rebuilt translation group descriptions");
    }
}
