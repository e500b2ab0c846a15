//! MySQL/MariaDB dialect.
use super::Dialect;

/// MySQL/MariaDB dialect implementation.
///
/// Session variables are written `@name`. Names using characters outside
/// `[A-Za-z0-9_.$]` are quoted, `@`name``, so any language slug can take part
/// in a variable name.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    pub fn new() -> Self {
        Self
    }
}

fn is_plain_variable(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$'))
}

impl Dialect for MysqlDialect {
    fn quote_ident(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn variable(&self, name: &str) -> String {
        if is_plain_variable(name) {
            format!("@{}", name)
        } else {
            format!("@{}", self.quote_ident(name))
        }
    }

    fn last_insert_id(&self) -> &str {
        "LAST_INSERT_ID()"
    }

    fn if_null(&self, expr: &str, fallback: &str) -> String {
        format!("IFNULL({}, {})", expr, fallback)
    }

    fn if_not_null(&self, guard: &str, then: &str, otherwise: &str) -> String {
        format!("IF({} IS NOT NULL, {}, {})", guard, then, otherwise)
    }

    fn concat(&self, parts: &[String]) -> String {
        format!("CONCAT({})", parts.join(", "))
    }

    fn preamble(&self) -> Vec<String> {
        vec![
            r#"SET SQL_MODE = "NO_AUTO_VALUE_ON_ZERO";"#.to_string(),
            r#"SET time_zone = "+00:00";"#.to_string(),
            "SET NAMES utf8mb4;".to_string(),
            "SET FOREIGN_KEY_CHECKS = 0;".to_string(),
        ]
    }

    fn epilogue(&self) -> Vec<String> {
        vec!["SET FOREIGN_KEY_CHECKS = 1;".to_string()]
    }
}
