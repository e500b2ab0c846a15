/// Renders text as a SQL string literal for the destination engine.
pub trait ValueEscaper: Send + Sync {
    /// Escapes `text` for use between single quotes, without adding them.
    fn escape(&self, text: &str) -> String;

    /// Escapes `text` and wraps it in single quotes.
    fn quote(&self, text: &str) -> String {
        format!("'{}'", self.escape(text))
    }
}
