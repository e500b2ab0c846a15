use std::fmt;

use crate::errors::ContentTypeError;

/// Longest content-type key the source schema can store.
const MAX_CONTENT_TYPE_LEN: usize = 20;

/// A sanitised content-type key such as `post`, `page` or `product`.
///
/// Keys are reduced to lowercase ASCII alphanumerics, `_` and `-`, which makes
/// them safe to embed in comments and quoted literals alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentType(String);

impl ContentType {
    pub fn parse(raw: &str) -> Result<Self, ContentTypeError> {
        let key: String = raw
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();

        if key.is_empty() {
            return Err(ContentTypeError::Empty(raw.to_string()));
        }
        if key.len() > MAX_CONTENT_TYPE_LEN {
            return Err(ContentTypeError::TooLong {
                value: key,
                max: MAX_CONTENT_TYPE_LEN,
            });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ContentType {
    type Err = ContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases_and_strips() {
        assert_eq!(ContentType::parse("Product").unwrap().as_str(), "product");
        assert_eq!(ContentType::parse("my_type-2").unwrap().as_str(), "my_type-2");
        assert_eq!(ContentType::parse("po'st; --").unwrap().as_str(), "post--");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(
            ContentType::parse("'; !"),
            Err(ContentTypeError::Empty("'; !".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_overlong_keys() {
        let result = ContentType::parse("a_really_long_content_type");
        assert!(matches!(result, Err(ContentTypeError::TooLong { max: 20, .. })));
    }
}
