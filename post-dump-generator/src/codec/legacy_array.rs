//! Legacy serialized associative arrays, e.g. `a:2:{s:2:"en";i:5;s:2:"fr";i:7;}`.
//!
//! Only the shape used by translation groups is supported: string keys mapped
//! to non-negative integer identifiers (numeric strings are accepted as
//! values). String lengths count bytes, not characters.
use crate::errors::DecodeError;

/// Ordered language-code to identifier map of one translation group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: Vec<(String, u64)>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `id`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, id: u64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = id,
            None => self.entries.push((key, id)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, id)| (key.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut map = TranslationMap::new();
        for (key, id) in iter {
            map.insert(key, id);
        }
        map
    }
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expect(&mut self, token: &'static str) -> Result<(), DecodeError> {
        let end = self.pos + token.len();
        if end > self.input.len() {
            return Err(DecodeError::UnexpectedEnd(self.pos));
        }
        if &self.input[self.pos..end] != token.as_bytes() {
            return Err(DecodeError::Expected {
                expected: token,
                position: self.pos,
            });
        }
        self.pos = end;
        Ok(())
    }

    /// Reads decimal digits up to and including `terminator`.
    fn unsigned(&mut self, terminator: u8) -> Result<u64, DecodeError> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == terminator {
                let digits = &self.input[start..self.pos];
                self.pos += 1;
                return std::str::from_utf8(digits)
                    .ok()
                    .filter(|digits| !digits.is_empty())
                    .and_then(|digits| digits.parse::<u64>().ok())
                    .ok_or(DecodeError::InvalidNumber(start));
            }
            self.pos += 1;
        }
        Err(DecodeError::UnexpectedEnd(self.pos))
    }

    /// Reads the body of `s:<len>:"<bytes>";` after the `s:` tag.
    fn string(&mut self) -> Result<&'a str, DecodeError> {
        let length_at = self.pos;
        let length =
            usize::try_from(self.unsigned(b':')?).map_err(|_| DecodeError::InvalidNumber(length_at))?;
        self.expect("\"")?;
        let start = self.pos;
        let end = start
            .checked_add(length)
            .filter(|end| *end <= self.input.len())
            .ok_or(DecodeError::UnexpectedEnd(self.input.len()))?;
        let text =
            std::str::from_utf8(&self.input[start..end]).map_err(|_| DecodeError::InvalidUtf8(start))?;
        self.pos = end;
        self.expect("\";")?;
        Ok(text)
    }

    fn key(&mut self) -> Result<&'a str, DecodeError> {
        let at = self.pos;
        if self.peek() == Some(b's') {
            self.expect("s:")?;
            self.string()
        } else if self.peek().is_none() {
            Err(DecodeError::UnexpectedEnd(at))
        } else {
            Err(DecodeError::UnsupportedKey(at))
        }
    }

    fn member(&mut self) -> Result<u64, DecodeError> {
        let at = self.pos;
        match self.peek() {
            Some(b'i') => {
                self.expect("i:")?;
                self.unsigned(b';')
            }
            Some(b's') => {
                self.expect("s:")?;
                self.string()?
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| DecodeError::UnsupportedValue(at))
            }
            Some(_) => Err(DecodeError::UnsupportedValue(at)),
            None => Err(DecodeError::UnexpectedEnd(at)),
        }
    }
}

/// Decodes a translation-group description.
///
/// # Errors
/// Returns a `DecodeError` when the text is not a well-formed array of string
/// keys and identifier values, or when the declared entry count disagrees
/// with the entries present.
pub fn decode(text: &str) -> Result<TranslationMap, DecodeError> {
    let mut cursor = Cursor::new(text.trim());
    cursor.expect("a:")?;
    let declared_at = cursor.pos;
    let declared = usize::try_from(cursor.unsigned(b':')?)
        .map_err(|_| DecodeError::InvalidNumber(declared_at))?;
    cursor.expect("{")?;

    let mut map = TranslationMap::new();
    let mut found = 0;
    while cursor.peek() != Some(b'}') {
        let key = cursor.key()?;
        let id = cursor.member()?;
        map.insert(key, id);
        found += 1;
    }
    cursor.expect("}")?;

    if cursor.pos != cursor.input.len() {
        return Err(DecodeError::TrailingData(cursor.pos));
    }
    if found != declared {
        return Err(DecodeError::CountMismatch { declared, found });
    }
    Ok(map)
}

/// A piece of an encoded map: fixed text or a member value to splice in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<T> {
    Literal(String),
    Value(T),
}

fn push_literal<T>(segments: &mut Vec<Segment<T>>, text: &str) {
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

/// Splits the encoding of `entries` into literal text and member slots.
///
/// Concatenating the literals with each slot's decimal rendering yields a
/// string `decode` reads back as the same keys in the same order. Adjacent
/// literals are merged.
pub fn template<'k, T, I>(entries: I) -> Vec<Segment<T>>
where
    I: IntoIterator<Item = (&'k str, T)>,
    I::IntoIter: ExactSizeIterator,
{
    let entries = entries.into_iter();
    let mut segments = Vec::with_capacity(entries.len() * 2 + 1);
    push_literal(&mut segments, &format!("a:{}:{{", entries.len()));
    for (key, value) in entries {
        push_literal(&mut segments, &format!("s:{}:\"{}\";i:", key.len(), key));
        segments.push(Segment::Value(value));
        push_literal(&mut segments, ";");
    }
    push_literal(&mut segments, "}");
    segments
}

/// Encodes `map` with its current identifiers.
pub fn encode(map: &TranslationMap) -> String {
    template(map.iter())
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Value(id) => id.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_two_languages() {
        let map = decode(r#"a:2:{s:2:"en";i:5;s:2:"fr";i:7;}"#).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("en", 5), ("fr", 7)]);
    }

    #[test]
    fn test_decode_numeric_string_value() {
        let map = decode(r#"a:1:{s:5:"pt-br";s:2:"42";}"#).unwrap();
        assert_eq!(map.get("pt-br"), Some(42));
    }

    #[test]
    fn test_decode_counts_bytes() {
        let map = decode("a:1:{s:3:\"\u{e9}s\";i:3;}").unwrap();
        assert_eq!(map.get("\u{e9}s"), Some(3));
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("a:0:{}").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_count_mismatch() {
        assert_eq!(
            decode(r#"a:3:{s:2:"en";i:5;}"#),
            Err(DecodeError::CountMismatch {
                declared: 3,
                found: 1
            })
        );
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(decode(r#"a:1:{s:3:"en";i:5;}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            decode("plain description"),
            Err(DecodeError::Expected { .. })
        ));
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_nested_values() {
        assert!(matches!(
            decode(r#"a:1:{s:4:"sync";a:0:{}}"#),
            Err(DecodeError::UnsupportedValue(_))
        ));
        assert!(matches!(
            decode(r#"a:1:{i:0;i:5;}"#),
            Err(DecodeError::UnsupportedKey(_))
        ));
    }

    #[test]
    fn test_decode_rejects_trailing_data() {
        assert!(matches!(
            decode(r#"a:0:{}x"#),
            Err(DecodeError::TrailingData(_))
        ));
    }

    #[test]
    fn test_duplicate_key_keeps_position() {
        let map = decode(r#"a:3:{s:2:"en";i:1;s:2:"fr";i:2;s:2:"en";i:3;}"#).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("en", 3), ("fr", 2)]);
    }

    #[test]
    fn test_encode_matches_legacy_text() {
        let map: TranslationMap = [("en", 5), ("fr", 7)].into_iter().collect();
        assert_eq!(encode(&map), r#"a:2:{s:2:"en";i:5;s:2:"fr";i:7;}"#);
    }

    #[test]
    fn test_template_merges_literals() {
        let segments = template([("en", 'A'), ("fr", 'B')]);
        assert_eq!(
            segments,
            vec![
                Segment::Literal(r#"a:2:{s:2:"en";i:"#.to_string()),
                Segment::Value('A'),
                Segment::Literal(r#";s:2:"fr";i:"#.to_string()),
                Segment::Value('B'),
                Segment::Literal(";}".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_evaluates_to_decodable_text() {
        let segments = template([("en", 5u64), ("fr", 7u64)]);
        let evaluated: String = segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text,
                Segment::Value(old) => (old * 100).to_string(),
            })
            .collect();
        let map = decode(&evaluated).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("en", 500), ("fr", 700)]);
    }
}
