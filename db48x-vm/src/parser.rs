//! Recursive-descent parser (spec.md §4.2): turns RPL source text into
//! [`Object`] values, one token or delimited construct at a time. The
//! grammar is hand-rolled over a character cursor rather than built on a
//! combinator crate, the same way `fuel_asm`'s opcode decoder walks a byte
//! cursor directly instead of reaching for a parser-generator dependency.

use alloc::{
    boxed::Box,
    format,
    string::{
        String,
        ToString,
    },
    vec::Vec,
};

use db48x_container::{
    Array,
    List,
    Program,
    Tag,
    Text,
};
use db48x_numeric::{
    AngleUnit,
    Complex,
    Date,
    Decimal,
    Fraction,
    HwFloat,
    Integer,
};
use db48x_object::{
    CommandId,
    ErrorKind,
};

use crate::object::Object;

/// A cursor over the source text plus the few pieces of lexical state the
/// grammar needs (current char, byte offset).
pub struct Parser<'a> {
    source: &'a str,
    chars: core::str::CharIndices<'a>,
    current: Option<(usize, char)>,
}

impl<'a> Parser<'a> {
    /// Build a parser over `source`.
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.char_indices();
        let current = chars.next();
        Parser { source, chars, current }
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = self.current?;
        self.current = self.chars.next();
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.current.map(|(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.current.map(|(i, _)| i).unwrap_or(self.source.len())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Parse one object, skipping any leading whitespace. Returns `None` at
    /// end of input.
    pub fn parse_object(&mut self) -> Result<Option<Object>, ErrorKind> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(None),
            Some('"') => self.parse_text().map(Some),
            Some('{') => self.parse_list().map(Some),
            Some('[') => self.parse_array().map(Some),
            Some('\u{ab}') => self.parse_program().map(Some),
            Some('\'') => self.parse_expression_literal().map(Some),
            Some(':') => self.parse_tag().map(Some),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number_or_symbol().map(Some),
            Some(_) => self.parse_symbol_or_command().map(Some),
        }
    }

    /// Parse every object in the source, in order.
    pub fn parse_all(&mut self) -> Result<Vec<Object>, ErrorKind> {
        let mut objects = Vec::new();
        while let Some(object) = self.parse_object()? {
            objects.push(object);
        }
        Ok(objects)
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let start = self.offset();
        while matches!(self.peek(), Some(c) if predicate(c)) {
            self.advance();
        }
        let end = self.offset();
        self.source[start..end].to_string()
    }

    fn expect(&mut self, expected: char) -> Result<(), ErrorKind> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(ErrorKind::SyntaxError)
        }
    }

    fn parse_text(&mut self) -> Result<Object, ErrorKind> {
        self.expect('"')?;
        let mut value = String::new();
        loop {
            match self.advance().ok_or(ErrorKind::SyntaxError)? {
                '"' if self.peek() == Some('"') => {
                    self.advance();
                    value.push('"');
                }
                '"' => break,
                c => value.push(c),
            }
        }
        Ok(Object::Text(Text::new(value)))
    }

    fn parse_list(&mut self) -> Result<Object, ErrorKind> {
        self.expect('{')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.advance();
                break;
            }
            items.push(self.parse_object()?.ok_or(ErrorKind::SyntaxError)?);
        }
        Ok(Object::List(Box::new(List::from_vec(items))))
    }

    fn parse_array(&mut self) -> Result<Object, ErrorKind> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.advance();
                break;
            }
            items.push(self.parse_object()?.ok_or(ErrorKind::SyntaxError)?);
        }
        Ok(Object::Array(Box::new(Array::from_vector(items))))
    }

    fn parse_program(&mut self) -> Result<Object, ErrorKind> {
        self.expect('\u{ab}')?;
        let mut steps = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('\u{bb}') {
                self.advance();
                break;
            }
            steps.push(self.parse_object()?.ok_or(ErrorKind::SyntaxError)?);
        }
        Ok(Object::Program(Box::new(Program::from_steps(steps))))
    }

    /// `'...'`: an expression literal is parsed by the rewrite module's
    /// infix grammar, not reparsed here as a nested program — this parser
    /// only extracts the raw text between the quotes.
    fn parse_expression_literal(&mut self) -> Result<Object, ErrorKind> {
        self.expect('\'')?;
        let start = self.offset();
        let mut depth = 0u32;
        loop {
            match self.peek().ok_or(ErrorKind::SyntaxError)? {
                '\'' if depth == 0 => break,
                '(' => {
                    depth += 1;
                    self.advance();
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
        let end = self.offset();
        self.expect('\'')?;
        let text = &self.source[start..end];
        crate::rewrite::parse_infix(text)
    }

    fn parse_tag(&mut self) -> Result<Object, ErrorKind> {
        self.expect(':')?;
        let name = self.take_while(|c| c != ':');
        self.expect(':')?;
        let value = self.parse_object()?.ok_or(ErrorKind::SyntaxError)?;
        Ok(Object::Tag(Box::new(Tag::new(name, value))))
    }

    fn parse_symbol_or_command(&mut self) -> Result<Object, ErrorKind> {
        let name = self.take_while(|c| !c.is_whitespace() && !"{}[]«»'\":".contains(c));
        if name.is_empty() {
            self.advance();
            return Err(ErrorKind::SyntaxError);
        }
        Ok(symbol_or_command(&name))
    }

    fn parse_number_or_symbol(&mut self) -> Result<Object, ErrorKind> {
        let start = self.offset();
        if self.peek() == Some('-') {
            self.advance();
        }
        let integer_part = self.take_while(|c| c.is_ascii_digit());
        if integer_part.is_empty() && self.offset() == start + 1 {
            // A lone `-` with no digits following is a symbol (`-` the
            // command, or the start of a longer identifier).
            let rest = self.take_while(|c| !c.is_whitespace() && !"{}[]«»'\":".contains(c));
            return Ok(symbol_or_command(&format!("-{rest}")));
        }

        if self.peek() == Some('#') {
            return self.parse_based_integer(start);
        }

        let mut fractional_part = String::new();
        if self.peek() == Some('.') {
            self.advance();
            fractional_part = self.take_while(|c| c.is_ascii_digit());
        }

        if self.peek() == Some('/') {
            return self.parse_fraction(start, &integer_part);
        }

        let mut exponent = String::new();
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                exponent.push(self.advance().unwrap());
            }
            exponent.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }

        if matches!(self.peek(), Some('\u{2220}')) {
            return self.parse_polar(start, &integer_part, &fractional_part);
        }
        if matches!(self.peek(), Some('+') | Some('-')) && self.looks_like_complex_tail() {
            return self.parse_rectangular(start, &integer_part, &fractional_part, &exponent);
        }
        if let Some(unit_name) = self.try_parse_unit_suffix() {
            let number = self.build_numeric(&integer_part, &fractional_part, &exponent)?;
            return Ok(Object::Unit(Box::new(crate::units::with_label(number, &unit_name)?)));
        }

        self.build_numeric(&integer_part, &fractional_part, &exponent)
    }

    fn looks_like_complex_tail(&self) -> bool {
        // A cheap lookahead: the remainder of the current token must end in
        // `ⅈ` for this to be a rectangular-complex literal rather than the
        // start of the next token (`3+4` followed by whitespace then `ⅈ` is
        // not a single literal).
        let rest = &self.source[self.offset()..];
        let end = rest.find(|c: char| c.is_whitespace() || "{}[]«»'\":".contains(c)).unwrap_or(rest.len());
        rest[..end].ends_with('\u{2148}')
    }

    fn parse_rectangular(&mut self, start: usize, int_part: &str, frac_part: &str, exp_part: &str) -> Result<Object, ErrorKind> {
        let re = build_f64(int_part, frac_part, exp_part)?;
        let sign = if self.advance() == Some('-') { -1.0 } else { 1.0 };
        let im_int = self.take_while(|c| c.is_ascii_digit());
        let mut im_frac = String::new();
        if self.peek() == Some('.') {
            self.advance();
            im_frac = self.take_while(|c| c.is_ascii_digit());
        }
        let im = sign * build_f64(&im_int, &im_frac, "")?;
        self.expect('\u{2148}')?;
        let _ = start;
        Ok(Object::Complex(Complex::rectangular(re, im)))
    }

    fn parse_polar(&mut self, start: usize, int_part: &str, frac_part: &str) -> Result<Object, ErrorKind> {
        let modulus = build_f64(int_part, frac_part, "")?;
        self.advance();
        let angle_int = self.take_while(|c| c.is_ascii_digit());
        let mut angle_frac = String::new();
        if self.peek() == Some('.') {
            self.advance();
            angle_frac = self.take_while(|c| c.is_ascii_digit());
        }
        let angle = build_f64(&angle_int, &angle_frac, "")?;
        let _ = start;
        Ok(Object::Complex(Complex::polar(modulus, db48x_numeric::Angle::new(angle, AngleUnit::Degrees))))
    }

    fn parse_fraction(&mut self, start: usize, int_part: &str) -> Result<Object, ErrorKind> {
        self.advance();
        let den_part = self.take_while(|c| c.is_ascii_digit());
        let _ = start;
        let numerator: Integer = parse_integer(int_part)?;
        let denominator: Integer = parse_integer(&den_part)?;
        Ok(Object::Fraction(Fraction::checked_new(numerator, denominator)?))
    }

    fn parse_based_integer(&mut self, start: usize) -> Result<Object, ErrorKind> {
        let radix_text = &self.source[start..self.offset()];
        let radix: u32 = radix_text.parse().map_err(|_| ErrorKind::SyntaxError)?;
        self.advance();
        let digits = self.take_while(|c| c.is_alphanumeric());
        let value = i64::from_str_radix(&digits, radix).map_err(|_| ErrorKind::SyntaxError)?;
        Ok(Object::Integer(Integer::from_i64(value)))
    }

    fn try_parse_unit_suffix(&mut self) -> Option<String> {
        if self.peek() != Some('_') {
            return None;
        }
        self.advance();
        Some(self.take_while(|c| !c.is_whitespace() && !"{}[]«»'\":".contains(c)))
    }

    fn build_numeric(&self, int_part: &str, frac_part: &str, exp_part: &str) -> Result<Object, ErrorKind> {
        if frac_part.is_empty() && exp_part.is_empty() {
            return Ok(Object::Integer(parse_integer(int_part)?));
        }
        let mantissa_digits = format!("{int_part}{frac_part}");
        let mantissa: num_bigint::BigInt = mantissa_digits.parse().map_err(|_| ErrorKind::SyntaxError)?;
        let exponent: i64 = if exp_part.is_empty() { 0 } else { exp_part.parse().map_err(|_| ErrorKind::SyntaxError)? };
        let exponent = exponent - frac_part.len() as i64;
        Ok(Object::Decimal(Decimal::from_parts(mantissa, exponent)))
    }
}

fn parse_integer(digits: &str) -> Result<Integer, ErrorKind> {
    Integer::parse_decimal(digits)
}

fn build_f64(int_part: &str, frac_part: &str, exp_part: &str) -> Result<f64, ErrorKind> {
    let text = if frac_part.is_empty() {
        format!("{int_part}{}", if exp_part.is_empty() { String::new() } else { format!("e{exp_part}") })
    } else {
        format!("{int_part}.{frac_part}{}", if exp_part.is_empty() { String::new() } else { format!("e{exp_part}") })
    };
    text.parse().map_err(|_| ErrorKind::SyntaxError)
}

fn symbol_or_command(name: &str) -> Object {
    if let Some(id) = command_by_name(name) {
        Object::Command(id)
    } else {
        Object::Symbol(name.to_string())
    }
}

fn command_by_name(name: &str) -> Option<CommandId> {
    use strum::IntoEnumIterator;
    CommandId::iter().find(|id| id.to_string() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_integer() {
        let mut parser = Parser::new("42");
        assert_eq!(parser.parse_object().unwrap(), Some(Object::Integer(Integer::from_i64(42))));
    }

    #[test]
    fn parses_a_negative_integer() {
        let mut parser = Parser::new("-7");
        assert_eq!(parser.parse_object().unwrap(), Some(Object::Integer(Integer::from_i64(-7))));
    }

    #[test]
    fn parses_a_decimal_with_exponent() {
        let mut parser = Parser::new("1.5E2");
        let object = parser.parse_object().unwrap().unwrap();
        match object {
            Object::Decimal(d) => assert_eq!(d.to_f64_approx(), 150.0),
            other => panic!("expected decimal, got {other:?}"),
        }
    }

    #[test]
    fn parses_an_exact_fraction() {
        let mut parser = Parser::new("3/4");
        let object = parser.parse_object().unwrap().unwrap();
        match object {
            Object::Fraction(f) => {
                assert_eq!(f.numerator(), Integer::from_i64(3));
                assert_eq!(f.denominator(), Integer::from_i64(4));
            }
            other => panic!("expected fraction, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_text_literal_with_an_escaped_quote() {
        let mut parser = Parser::new("\"say \"\"hi\"\"\"");
        let object = parser.parse_object().unwrap().unwrap();
        assert_eq!(object, Object::Text(Text::new("say \"hi\"".to_string())));
    }

    #[test]
    fn parses_a_list_of_integers() {
        let mut parser = Parser::new("{ 1 2 3 }");
        let object = parser.parse_object().unwrap().unwrap();
        match object {
            Object::List(l) => assert_eq!(l.len(), 3),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_program() {
        let mut parser = Parser::new("\u{ab} 1 2 + \u{bb}");
        let object = parser.parse_object().unwrap().unwrap();
        match object {
            Object::Program(p) => assert_eq!(p.len(), 3),
            other => panic!("expected program, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_bare_name_as_a_symbol() {
        let mut parser = Parser::new("xyz");
        assert_eq!(parser.parse_object().unwrap(), Some(Object::Symbol("xyz".to_string())));
    }

    #[test]
    fn parses_a_tagged_value() {
        let mut parser = Parser::new(":Speed:5");
        let object = parser.parse_object().unwrap().unwrap();
        match object {
            Object::Tag(t) => assert_eq!(t.name(), "Speed"),
            other => panic!("expected tag, got {other:?}"),
        }
    }
}
