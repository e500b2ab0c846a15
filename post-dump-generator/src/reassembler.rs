//! Translation-group reassembly.
//!
//! Group descriptions are captured while their taxonomy rows are copied
//! (written empty), then rebuilt once every member has a destination id: the
//! encoded map becomes a concatenation of fixed text and member placeholders,
//! evaluated by the destination engine at replay.
use indexmap::IndexMap;
use post_dump_shared::names::{POST_TRANSLATIONS, TERM_TRANSLATIONS};

use crate::codec::{self, Segment, TranslationMap};
use crate::errors::DecodeError;
use crate::symbols::{Symbol, SymbolTable};

/// The two families of translation groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Groups of content items.
    Content,
    /// Groups of terms.
    Term,
}

impl GroupKind {
    pub fn taxonomy(self) -> &'static str {
        match self {
            GroupKind::Content => POST_TRANSLATIONS,
            GroupKind::Term => TERM_TRANSLATIONS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Content => "Post translation group",
            GroupKind::Term => "Term translation group",
        }
    }

    pub fn member(self, id: u64) -> Symbol {
        match self {
            GroupKind::Content => Symbol::Post(id),
            GroupKind::Term => Symbol::Term(id),
        }
    }

    pub fn group_term(self, id: u64) -> Symbol {
        match self {
            GroupKind::Content => Symbol::PostGroupTerm(id),
            GroupKind::Term => Symbol::TermGroupTerm(id),
        }
    }

    pub fn group_taxonomy(self, id: u64) -> Symbol {
        match self {
            GroupKind::Content => Symbol::PostGroupTaxonomy(id),
            GroupKind::Term => Symbol::TermGroupTaxonomy(id),
        }
    }

    /// Symbol constructor for references to the group's own term.
    pub fn group_term_ctor(self) -> fn(u64) -> Symbol {
        match self {
            GroupKind::Content => Symbol::PostGroupTerm,
            GroupKind::Term => Symbol::TermGroupTerm,
        }
    }
}

/// Decoded groups keyed by the source id of the group's term.
#[derive(Debug, Clone, Default)]
pub struct TranslationGroups {
    groups: IndexMap<u64, TranslationMap>,
}

impl TranslationGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes and records the description of group `group_term_id`.
    ///
    /// A second description for the same group replaces the first and keeps
    /// its position.
    pub fn capture(&mut self, group_term_id: u64, description: &str) -> Result<(), DecodeError> {
        let map = codec::decode(description)?;
        self.groups.insert(group_term_id, map);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &TranslationMap)> {
        self.groups.iter().map(|(id, map)| (*id, map))
    }
}

/// Members of `map` whose placeholder has been allocated, in source order.
pub fn allocated_members(map: &TranslationMap, kind: GroupKind, symbols: &SymbolTable) -> TranslationMap {
    map.iter()
        .filter(|(_, id)| symbols.is_bound(&kind.member(*id)))
        .collect()
}

/// Template of the rebuilt description, with a member symbol in each slot.
pub fn description_template(map: &TranslationMap, kind: GroupKind) -> Vec<Segment<Symbol>> {
    codec::template(map.iter().map(|(key, id)| (key, kind.member(id))))
}

/// The source map as a JSON object, keys in source order.
pub fn group_json(map: &TranslationMap) -> String {
    let object: serde_json::Map<String, serde_json::Value> = map
        .iter()
        .map(|(key, id)| (key.to_string(), serde_json::Value::from(id)))
        .collect();
    serde_json::Value::Object(object).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Binding;
    use std::collections::HashMap;

    fn evaluate(template: Vec<Segment<Symbol>>, values: &HashMap<Symbol, u64>) -> String {
        template
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text,
                Segment::Value(symbol) => values[&symbol].to_string(),
            })
            .collect()
    }

    #[test]
    fn test_template_round_trip() {
        let map = codec::decode(r#"a:2:{s:2:"en";i:5;s:2:"fr";i:7;}"#).unwrap();
        let template = description_template(&map, GroupKind::Content);
        let values = HashMap::from([(Symbol::Post(5), 1005), (Symbol::Post(7), 1007)]);

        let rebuilt = codec::decode(&evaluate(template, &values)).unwrap();
        assert_eq!(rebuilt.iter().collect::<Vec<_>>(), vec![("en", 1005), ("fr", 1007)]);
    }

    #[test]
    fn test_allocated_members_drops_unexported() {
        let map: TranslationMap = [("en", 5), ("fr", 7), ("de", 9)].into_iter().collect();
        let mut symbols = SymbolTable::new();
        symbols.bind(Symbol::Term(5), Binding::Definite);
        symbols.bind(Symbol::Term(9), Binding::Definite);
        symbols.bind(Symbol::Post(7), Binding::Definite);

        let members = allocated_members(&map, GroupKind::Term, &symbols);
        assert_eq!(members.iter().collect::<Vec<_>>(), vec![("en", 5), ("de", 9)]);

        let template = description_template(&members, GroupKind::Term);
        assert_eq!(
            template.first(),
            Some(&Segment::Literal(r#"a:2:{s:2:"en";i:"#.to_string()))
        );
    }

    #[test]
    fn test_capture_rejects_malformed_description() {
        let mut groups = TranslationGroups::new();
        assert!(groups.capture(3, "not serialized").is_err());
        assert_eq!(groups.iter().count(), 0);
        groups.capture(4, r#"a:1:{s:2:"en";i:1;}"#).unwrap();
        let captured: Vec<(u64, Option<u64>)> =
            groups.iter().map(|(id, map)| (id, map.get("en"))).collect();
        assert_eq!(captured, vec![(4, Some(1))]);
    }

    #[test]
    fn test_group_json_keeps_order() {
        let map: TranslationMap = [("fr", 7), ("en", 5)].into_iter().collect();
        assert_eq!(group_json(&map), r#"{"fr":7,"en":5}"#);
    }
}
