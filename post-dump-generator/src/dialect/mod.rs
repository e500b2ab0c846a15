//! Destination SQL dialect (Strategy pattern).
//!
//! Everything engine-specific about the emitted script goes through here:
//! identifier quoting, session-variable syntax, the last-insert-id capture and
//! the null-coalescing and concatenation functions.
mod mysql;

pub use mysql::MysqlDialect;

/// SQL syntax of the engine the script is replayed against.
pub trait Dialect: Send + Sync {
    /// Quote a table or column name.
    fn quote_ident(&self, name: &str) -> String;

    /// Render a reference to the session variable `name`.
    fn variable(&self, name: &str) -> String;

    /// Expression yielding the key generated by the last insert.
    fn last_insert_id(&self) -> &str;

    /// Statement assigning `expr` to an already rendered variable.
    fn assign(&self, variable: &str, expr: &str) -> String {
        format!("SET {} = {};", variable, expr)
    }

    /// `expr`, or `fallback` when `expr` is null.
    fn if_null(&self, expr: &str, fallback: &str) -> String;

    /// `then` when `guard` is not null, `otherwise` when it is.
    fn if_not_null(&self, guard: &str, then: &str, otherwise: &str) -> String;

    /// String concatenation of already rendered expressions.
    fn concat(&self, parts: &[String]) -> String;

    /// Session directives opening a script. Integrity checks are disabled
    /// here so rows can be deleted and inserted in any order.
    fn preamble(&self) -> Vec<String>;

    /// Session directives closing a script.
    fn epilogue(&self) -> Vec<String>;
}
