//! Per-stage statement emission.
//!
//! `assemble` walks [`Stage::ORDER`] and hands each stage the snapshot and
//! the shared [`Emission`] state. Stages only read placeholders allocated by
//! stages before them.
mod backfill;
mod content;
mod preamble;
mod relationships;
mod terms;

use chrono::{DateTime, Utc};
use post_dump_repository::ValueEscaper;
use post_dump_shared::{ContentType, Row, Value};

use crate::config::GeneratorConfig;
use crate::dialect::Dialect;
use crate::emitter::{self, Insert, RowPlan};
use crate::errors::GenerateError;
use crate::extraction::ExportSnapshot;
use crate::reassembler::{GroupKind, TranslationGroups};
use crate::script::{ScriptBuilder, SqlScript};
use crate::stage::Stage;
use crate::symbols::{Binding, Symbol, SymbolTable};

/// State shared by the stages of one script.
pub(crate) struct Emission<'a> {
    pub config: &'a GeneratorConfig,
    pub dialect: &'a dyn Dialect,
    pub escaper: &'a dyn ValueEscaper,
    pub content_type: &'a ContentType,
    pub generated_at: DateTime<Utc>,
    pub symbols: SymbolTable,
    pub content_groups: TranslationGroups,
    pub term_groups: TranslationGroups,
}

impl<'a> Emission<'a> {
    pub fn new(
        config: &'a GeneratorConfig,
        dialect: &'a dyn Dialect,
        escaper: &'a dyn ValueEscaper,
        content_type: &'a ContentType,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            config,
            dialect,
            escaper,
            content_type,
            generated_at,
            symbols: SymbolTable::new(),
            content_groups: TranslationGroups::new(),
            term_groups: TranslationGroups::new(),
        }
    }

    /// Quoted, prefixed table name.
    pub fn table(&self, name: &str) -> String {
        self.dialect.quote_ident(&self.config.table(name))
    }

    pub fn ident(&self, name: &str) -> String {
        self.dialect.quote_ident(name)
    }

    /// Quoted string literal.
    pub fn text(&self, text: &str) -> String {
        self.escaper.quote(text)
    }

    pub fn literal(&self, value: &Value) -> String {
        emitter::literal(value, self.escaper)
    }

    /// Literal of `column`, `NULL` when the row lacks it.
    pub fn column_literal(&self, row: &Row, column: &str) -> String {
        row.get(column)
            .map(|value| self.literal(value))
            .unwrap_or_else(|| "NULL".to_string())
    }

    /// Insert of one key/value metadata row owned by `owner`.
    pub fn meta_insert(
        &self,
        table: &str,
        owner_column: &str,
        owner: String,
        key: String,
        value: String,
    ) -> Insert {
        Insert::new(self.config.table(table))
            .value(owner_column, owner)
            .value("meta_key", key)
            .value("meta_value", value)
    }

    pub fn var(&mut self, symbol: &Symbol) -> String {
        self.symbols.placeholder(symbol, self.dialect)
    }

    pub fn reference(&mut self, symbol: &Symbol, fallback: &str) -> String {
        self.symbols.reference(symbol, fallback, self.dialect)
    }

    pub fn is_bound(&self, symbol: &Symbol) -> bool {
        self.symbols.is_bound(symbol)
    }

    pub fn groups_mut(&mut self, kind: GroupKind) -> &mut TranslationGroups {
        match kind {
            GroupKind::Content => &mut self.content_groups,
            GroupKind::Term => &mut self.term_groups,
        }
    }

    /// Builds the insert copying `row` into the prefixed `table`.
    pub fn insert_row(&mut self, table: &str, row: &Row, plan: &RowPlan) -> Insert {
        let mut insert = Insert::new(self.config.table(table));
        for (column, expr) in &plan.leading {
            insert.push(*column, expr.clone());
        }
        for (column, value) in row.iter() {
            if plan.is_dropped(column) {
                continue;
            }
            let expr = if let Some(expr) = plan.override_for(column) {
                expr.to_string()
            } else if let Some(to) = plan.reference_for(column) {
                match value.as_id() {
                    Some(id) => self.reference(&to(id), "0"),
                    None => self.literal(value),
                }
            } else {
                self.literal(value)
            };
            insert.push(column, expr);
        }
        insert
    }

    /// Allocates `symbol` to the key of the insert just emitted.
    ///
    /// With a `guard` the insert may have been skipped at replay, so the
    /// symbol is set to null in that case.
    pub fn capture(&mut self, symbol: Symbol, guard: Option<&Symbol>) -> String {
        let variable = self.var(&symbol);
        match guard {
            None => {
                self.symbols.bind(symbol, Binding::Definite);
                self.dialect.assign(&variable, self.dialect.last_insert_id())
            }
            Some(guard) => {
                let guard = self.var(guard);
                self.symbols.bind(symbol, Binding::Conditional);
                let expr = self
                    .dialect
                    .if_not_null(&guard, self.dialect.last_insert_id(), "NULL");
                self.dialect.assign(&variable, &expr)
            }
        }
    }

    /// Allocates `symbol` to a literal string value.
    pub fn assign_text(&mut self, symbol: Symbol, text: &str) -> String {
        let variable = self.var(&symbol);
        self.symbols.bind(symbol, Binding::Definite);
        self.dialect.assign(&variable, &self.text(text))
    }
}

/// Renders the statements of every stage, in order.
pub(crate) fn assemble(
    emission: &mut Emission<'_>,
    snapshot: &ExportSnapshot,
) -> Result<SqlScript, GenerateError> {
    let mut out = ScriptBuilder::new(emission.content_type.as_str());
    for stage in Stage::ORDER {
        out.enter(stage)?;
        match stage {
            Stage::Header => preamble::header(emission, &mut out),
            Stage::Cleanup => preamble::cleanup(emission, snapshot, &mut out),
            Stage::LanguageMap => preamble::language_map(emission, snapshot, &mut out),
            Stage::Content => content::items(emission, snapshot, &mut out),
            Stage::Attachments => content::attachments(emission, snapshot, &mut out),
            Stage::AttachmentMeta => content::attachment_meta(emission, snapshot, &mut out),
            Stage::ContentMeta => content::item_meta(emission, snapshot, &mut out),
            Stage::ContentGroupTerms => {
                terms::group_terms(emission, &snapshot.post_group_terms, GroupKind::Content, &mut out)
            }
            Stage::ContentGroupTaxonomy => terms::group_taxonomy(
                emission,
                &snapshot.post_group_taxonomy,
                GroupKind::Content,
                &mut out,
            ),
            Stage::PlainTerms => terms::plain_terms(emission, snapshot, &mut out),
            Stage::TermGroupTerms => {
                terms::group_terms(emission, &snapshot.term_group_terms, GroupKind::Term, &mut out)
            }
            Stage::TermGroupTaxonomy => terms::group_taxonomy(
                emission,
                &snapshot.term_group_taxonomy,
                GroupKind::Term,
                &mut out,
            ),
            Stage::PlainTaxonomy => terms::plain_taxonomy(emission, snapshot, &mut out),
            Stage::TermMeta => terms::term_meta(emission, snapshot, &mut out),
            Stage::AssignTermLanguages => relationships::term_languages(emission, snapshot, &mut out),
            Stage::AssignContentLanguages => {
                relationships::item_languages(emission, snapshot, &mut out)
            }
            Stage::ContentRelationships => relationships::item_terms(emission, snapshot, &mut out),
            Stage::TermRelationships => relationships::term_groups(emission, snapshot, &mut out),
            Stage::BackfillContentGroups => backfill::groups(emission, GroupKind::Content, &mut out),
            Stage::BackfillTermGroups => backfill::groups(emission, GroupKind::Term, &mut out),
            Stage::Footer => preamble::footer(emission, &mut out),
        }
    }
    out.finish()
}
