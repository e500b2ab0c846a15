//! Symbolic identifiers for rows whose keys are assigned at replay time.
//!
//! Every exported row gets a session variable named after its kind and its
//! source identifier. The table records which variables the script has
//! assigned so far and whether the assignment can be null at replay.
use std::collections::HashMap;
use std::fmt;

use crate::dialect::Dialect;

/// A row or language whose destination identifier is only known at replay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A content item of the exported type.
    Post(u64),
    /// A featured-image attachment.
    Attachment(u64),
    /// The term behind a content translation group.
    PostGroupTerm(u64),
    /// The taxonomy row of a content translation group.
    PostGroupTaxonomy(u64),
    /// A regular term.
    Term(u64),
    /// The taxonomy row of a regular term.
    TermTaxonomy(u64),
    /// The term behind a term translation group.
    TermGroupTerm(u64),
    /// The taxonomy row of a term translation group.
    TermGroupTaxonomy(u64),
    /// Language slug recorded for a content item.
    PostLanguage(u64),
    /// Language slug recorded for a term.
    TermLanguage(u64),
    /// Destination content-language taxonomy row for a slug.
    ContentLanguage(String),
    /// Destination term-language taxonomy row for a slug.
    TermLanguageMapping(String),
}

impl Symbol {
    /// Bare variable name, without dialect decoration.
    pub fn name(&self) -> String {
        match self {
            Symbol::Post(id) => format!("post_id_{}", id),
            Symbol::Attachment(id) => format!("attachment_id_{}", id),
            Symbol::PostGroupTerm(id) => format!("trans_term_id_{}", id),
            Symbol::PostGroupTaxonomy(id) => format!("trans_term_taxonomy_id_{}", id),
            Symbol::Term(id) => format!("term_id_{}", id),
            Symbol::TermTaxonomy(id) => format!("term_taxonomy_id_{}", id),
            Symbol::TermGroupTerm(id) => format!("term_trans_term_id_{}", id),
            Symbol::TermGroupTaxonomy(id) => format!("term_trans_term_taxonomy_id_{}", id),
            Symbol::PostLanguage(id) => format!("post_{}_lang", id),
            Symbol::TermLanguage(id) => format!("term_{}_lang", id),
            Symbol::ContentLanguage(slug) => format!("existing_lang_{}", slug),
            Symbol::TermLanguageMapping(slug) => format!("existing_term_lang_{}", slug),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// How an assigned symbol behaves at replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Always holds a key once its statement ran.
    Definite,
    /// Null when the guarded insert that defines it was skipped.
    Conditional,
}

/// Book-keeping for symbol allocation and placeholder rendering.
#[derive(Debug, Default)]
pub struct SymbolTable {
    bindings: HashMap<Symbol, Binding>,
    rendered: HashMap<Symbol, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the allocation of `symbol`.
    ///
    /// # Returns
    /// `false` when the symbol was already allocated; the earlier binding is kept.
    pub fn bind(&mut self, symbol: Symbol, binding: Binding) -> bool {
        if self.bindings.contains_key(&symbol) {
            return false;
        }
        self.bindings.insert(symbol, binding);
        true
    }

    pub fn binding(&self, symbol: &Symbol) -> Option<Binding> {
        self.bindings.get(symbol).copied()
    }

    pub fn is_bound(&self, symbol: &Symbol) -> bool {
        self.bindings.contains_key(symbol)
    }

    /// Rendered variable for `symbol`. The same symbol always renders to the
    /// same text within one table.
    pub fn placeholder(&mut self, symbol: &Symbol, dialect: &dyn Dialect) -> String {
        if let Some(rendered) = self.rendered.get(symbol) {
            return rendered.clone();
        }
        let rendered = dialect.variable(&symbol.name());
        self.rendered.insert(symbol.clone(), rendered.clone());
        rendered
    }

    /// Expression standing for `symbol` in a statement emitted now.
    ///
    /// Definite symbols render as their variable, conditional ones fall back
    /// to `fallback` when null at replay, and symbols never allocated render as
    /// `fallback` directly.
    pub fn reference(&mut self, symbol: &Symbol, fallback: &str, dialect: &dyn Dialect) -> String {
        match self.binding(symbol) {
            Some(Binding::Definite) => self.placeholder(symbol, dialect),
            Some(Binding::Conditional) => {
                let variable = self.placeholder(symbol, dialect);
                dialect.if_null(&variable, fallback)
            }
            None => fallback.to_string(),
        }
    }
}
