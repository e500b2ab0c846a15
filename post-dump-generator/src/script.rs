//! Ordered script output.
use std::fmt;

use crate::errors::GenerateError;
use crate::stage::Stage;

/// A generated SQL script.
///
/// Entries are statements, comment lines and blank lines in emission order.
/// The rendered text joins them with newlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlScript {
    entries: Vec<String>,
    sections: Vec<(Stage, usize)>,
}

impl SqlScript {
    /// Every entry, including comments and blank lines.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// SQL statements only.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|entry| !entry.is_empty() && !entry.starts_with("--"))
    }

    /// Stages in the order they were entered, with the index of their first entry.
    pub fn sections(&self) -> &[(Stage, usize)] {
        &self.sections
    }

    /// Entries belonging to `stage`.
    pub fn section(&self, stage: Stage) -> &[String] {
        let Some(at) = self.sections.iter().position(|(entered, _)| *entered == stage) else {
            return &[];
        };
        let start = self.sections[at].1;
        let end = self
            .sections
            .get(at + 1)
            .map(|(_, index)| *index)
            .unwrap_or(self.entries.len());
        &self.entries[start..end]
    }
}

impl fmt::Display for SqlScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries.join("\n"))
    }
}

/// Append-only sink enforcing the stage order.
#[derive(Debug)]
pub struct ScriptBuilder {
    content_type: String,
    entries: Vec<String>,
    sections: Vec<(Stage, usize)>,
}

impl ScriptBuilder {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            entries: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<Stage> {
        self.sections.last().map(|(stage, _)| *stage)
    }

    /// Opens `stage`, writing its title block.
    ///
    /// # Errors
    /// `GenerateError::StageOrder` if `stage` does not directly follow the
    /// current one.
    pub fn enter(&mut self, stage: Stage) -> Result<(), GenerateError> {
        let expected = match self.current() {
            None => Some(Stage::Header),
            Some(current) => current.next(),
        };
        if expected != Some(stage) {
            return Err(GenerateError::StageOrder {
                expected: expected.unwrap_or(Stage::Footer),
                found: stage,
            });
        }
        self.sections.push((stage, self.entries.len()));
        if let Some(title) = stage.title(&self.content_type) {
            self.comment("");
            self.comment(&title);
            self.comment("");
            self.blank();
        }
        Ok(())
    }

    /// Adds `-- text`, or a bare `--` for empty text.
    ///
    /// Control characters in `text` are written as escape sequences, so the
    /// comment always ends at its own line.
    pub fn comment(&mut self, text: &str) {
        if text.is_empty() {
            self.entries.push("--".to_string());
        } else {
            self.entries.push(format!("-- {}", single_line(text)));
        }
    }

    pub fn statement(&mut self, sql: impl Into<String>) {
        self.entries.push(sql.into());
    }

    pub fn blank(&mut self) {
        self.entries.push(String::new());
    }

    /// Closes the script.
    ///
    /// # Errors
    /// `GenerateError::Incomplete` unless the footer was entered.
    pub fn finish(self) -> Result<SqlScript, GenerateError> {
        match self.current() {
            Some(Stage::Footer) => Ok(SqlScript {
                entries: self.entries,
                sections: self.sections,
            }),
            other => Err(GenerateError::Incomplete {
                last: other.map(|stage| stage.to_string()).unwrap_or_else(|| "none".to_string()),
            }),
        }
    }
}

fn single_line(text: &str) -> String {
    let mut line = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            line.extend(c.escape_default());
        } else {
            line.push(c);
        }
    }
    line
}
