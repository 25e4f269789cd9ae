//! UTF-8 text (spec.md §4.4): `HEAD`/`TAIL` act on code points, `SIZE`
//! counts code points, `Extract` uses 1-based code-point indices.

use alloc::string::{
    String,
    ToString,
};
use db48x_object::ErrorKind;

/// A UTF-8 text object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text(String);

impl Text {
    /// Build from an owned `String`.
    pub fn new(value: String) -> Self {
        Text(value)
    }

    /// Borrow the underlying `str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code-point count (`SIZE`).
    pub fn size(&self) -> usize {
        self.0.chars().count()
    }

    /// The first code point (`HEAD`).
    pub fn head(&self) -> Result<char, ErrorKind> {
        self.0.chars().next().ok_or(ErrorKind::IndexOutOfRange)
    }

    /// Every code point after the first (`TAIL`).
    pub fn tail(&self) -> Result<Self, ErrorKind> {
        let mut chars = self.0.chars();
        if chars.next().is_none() {
            return Err(ErrorKind::IndexOutOfRange);
        }
        Ok(Text(chars.as_str().to_string()))
    }

    /// The 1-based, inclusive code-point range `[first, last]`.
    pub fn extract(&self, first: usize, last: usize) -> Result<Self, ErrorKind> {
        if first == 0 || last < first {
            return Err(ErrorKind::IndexOutOfRange);
        }
        let chars: alloc::vec::Vec<char> = self.0.chars().collect();
        if last > chars.len() {
            return Err(ErrorKind::IndexOutOfRange);
        }
        Ok(Text(chars[first - 1..last].iter().collect()))
    }

    /// Concatenation, coercing a non-text right-hand side to its rendered
    /// form via `Display`.
    pub fn concat(&self, other: &dyn core::fmt::Display) -> Self {
        let mut combined = self.0.clone();
        combined.push_str(&other.to_string());
        Text(combined)
    }
}

impl core::fmt::Display for Text {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_counts_code_points_not_bytes() {
        let t = Text::new("héllo".to_string());
        assert_eq!(t.size(), 5);
    }

    #[test]
    fn head_and_tail_split_on_the_first_code_point() {
        let t = Text::new("abc".to_string());
        assert_eq!(t.head().unwrap(), 'a');
        assert_eq!(t.tail().unwrap(), Text::new("bc".to_string()));
    }

    #[test]
    fn extract_uses_one_based_inclusive_indices() {
        let t = Text::new("hello".to_string());
        assert_eq!(t.extract(2, 4).unwrap(), Text::new("ell".to_string()));
    }

    #[test]
    fn extract_out_of_range_is_an_error() {
        let t = Text::new("hi".to_string());
        assert_eq!(t.extract(1, 5), Err(ErrorKind::IndexOutOfRange));
    }

    #[test]
    fn concat_coerces_a_non_text_operand_to_its_rendered_form() {
        let t = Text::new("x = ".to_string());
        assert_eq!(t.concat(&42), Text::new("x = 42".to_string()));
    }
}
