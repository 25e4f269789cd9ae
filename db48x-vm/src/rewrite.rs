//! Infix expression parsing and the symbolic rewrite engine (spec.md §4.7):
//! `'...'` literal parsing, auto-simplification, substitution, symbolic
//! differentiation, a basic table of primitives, and `ISOL`'s isolate-by
//! peeling-outermost-operator algorithm. Operates on `ExprNode<Object>`,
//! the same tree `db48x-container::expression` already gives every other
//! object family in this workspace.
//!
//! The infix grammar accepted here is a deliberately smaller dialect than
//! the RPN object grammar in [`crate::parser`]: plain integer and decimal
//! literals, names, the six arithmetic operators, postfix `!`, and
//! parenthesized function calls. Based numbers, fractions, units, and
//! complex literals are not meaningful inside an algebraic expression node
//! the way they are as standalone stack objects, so they are left out
//! rather than half-supported.

use alloc::{
    boxed::Box,
    string::{
        String,
        ToString,
    },
    vec,
    vec::Vec,
};
use core::str::CharIndices;

use db48x_container::{
    Arity,
    ExprNode,
};
use db48x_numeric::Integer;
use db48x_object::ErrorKind;

use crate::{
    arithmetic::{
        self,
        BinaryOp,
        Transcendental,
    },
    object::Object,
};

const DEFAULT_PRECISION: u32 = 16;

// ---------------------------------------------------------------------
// Infix parsing
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    LParen,
    RParen,
    Comma,
}

struct Lexer<'a> {
    source: &'a str,
    chars: CharIndices<'a>,
    current: Option<(usize, char)>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        let mut chars = source.char_indices();
        let current = chars.next();
        Lexer { source, chars, current }
    }

    fn advance(&mut self) {
        self.current = self.chars.next();
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ErrorKind> {
        let mut tokens = Vec::new();
        while let Some((start, c)) = self.current {
            if c.is_whitespace() {
                self.advance();
                continue;
            }
            match c {
                '+' => {
                    tokens.push(Token::Plus);
                    self.advance();
                }
                '-' => {
                    tokens.push(Token::Minus);
                    self.advance();
                }
                '*' => {
                    tokens.push(Token::Star);
                    self.advance();
                }
                '/' => {
                    tokens.push(Token::Slash);
                    self.advance();
                }
                '^' => {
                    tokens.push(Token::Caret);
                    self.advance();
                }
                '!' => {
                    tokens.push(Token::Bang);
                    self.advance();
                }
                '(' => {
                    tokens.push(Token::LParen);
                    self.advance();
                }
                ')' => {
                    tokens.push(Token::RParen);
                    self.advance();
                }
                ',' => {
                    tokens.push(Token::Comma);
                    self.advance();
                }
                c if c.is_ascii_digit() || c == '.' => {
                    let mut end = start + c.len_utf8();
                    self.advance();
                    while let Some((i, c)) = self.current {
                        if c.is_ascii_digit() || c == '.' {
                            end = i + c.len_utf8();
                            self.advance();
                        } else if (c == 'e' || c == 'E') && self.peek_exponent_sign_or_digit() {
                            end = i + c.len_utf8();
                            self.advance();
                            if let Some((j, s)) = self.current {
                                if s == '+' || s == '-' {
                                    end = j + s.len_utf8();
                                    self.advance();
                                }
                            }
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token::Number(self.source[start..end].to_string()));
                }
                c if c.is_alphabetic() || c == '_' => {
                    let mut end = start + c.len_utf8();
                    self.advance();
                    while let Some((i, c)) = self.current {
                        if c.is_alphanumeric() || c == '_' {
                            end = i + c.len_utf8();
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token::Ident(self.source[start..end].to_string()));
                }
                _ => return Err(ErrorKind::SyntaxError),
            }
        }
        Ok(tokens)
    }

    fn peek_exponent_sign_or_digit(&self) -> bool {
        let mut rest = self.chars.clone();
        match rest.next() {
            Some((_, c)) if c.is_ascii_digit() => true,
            Some((_, c)) if c == '+' || c == '-' => matches!(rest.next(), Some((_, d)) if d.is_ascii_digit()),
            _ => false,
        }
    }
}

struct InfixParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl InfixParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn expect(&mut self, token: &Token) -> Result<(), ErrorKind> {
        if self.peek() == Some(token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ErrorKind::SyntaxError)
        }
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<ExprNode<Object>, ErrorKind> {
        let mut node = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    node = binary("+", node, self.parse_term()?);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    node = binary("-", node, self.parse_term()?);
                }
                _ => break,
            }
        }
        Ok(node)
    }

    // term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<ExprNode<Object>, ErrorKind> {
        let mut node = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    node = binary("*", node, self.parse_unary()?);
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    node = binary("/", node, self.parse_unary()?);
                }
                _ => break,
            }
        }
        Ok(node)
    }

    // unary := '-' unary | power
    fn parse_unary(&mut self) -> Result<ExprNode<Object>, ErrorKind> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            return Ok(unary("neg", self.parse_unary()?));
        }
        self.parse_power()
    }

    // power := postfix ('^' unary)?  (right-associative)
    fn parse_power(&mut self) -> Result<ExprNode<Object>, ErrorKind> {
        let base = self.parse_postfix()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.parse_unary()?;
            return Ok(binary("^", base, exponent));
        }
        Ok(base)
    }

    // postfix := primary '!'?
    fn parse_postfix(&mut self) -> Result<ExprNode<Object>, ErrorKind> {
        let mut node = self.parse_primary()?;
        while self.peek() == Some(&Token::Bang) {
            self.pos += 1;
            node = unary("!", node);
        }
        Ok(node)
    }

    // primary := Number | Ident ['(' args ')'] | '(' expr ')'
    fn parse_primary(&mut self) -> Result<ExprNode<Object>, ErrorKind> {
        match self.next().ok_or(ErrorKind::Unterminated)? {
            Token::Number(text) => Ok(ExprNode::Leaf(parse_number_literal(&text)?)),
            Token::Ident(name) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    let args = self.parse_args()?;
                    self.expect(&Token::RParen)?;
                    let len = args.len();
                    Ok(ExprNode::Apply { operator: name.to_uppercase(), arity: Arity::Fixed(len), args })
                } else {
                    Ok(ExprNode::Symbol(name))
                }
            }
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            _ => Err(ErrorKind::SyntaxError),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<ExprNode<Object>>, ErrorKind> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            return Ok(args);
        }
        args.push(self.parse_expr()?);
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            args.push(self.parse_expr()?);
        }
        Ok(args)
    }
}

fn binary(operator: &str, a: ExprNode<Object>, b: ExprNode<Object>) -> ExprNode<Object> {
    ExprNode::Apply { operator: operator.to_string(), arity: Arity::Fixed(2), args: vec![a, b] }
}

fn unary(operator: &str, a: ExprNode<Object>) -> ExprNode<Object> {
    ExprNode::Apply { operator: operator.to_string(), arity: Arity::Fixed(1), args: vec![a] }
}

fn leaf_i64(n: i64) -> ExprNode<Object> {
    ExprNode::Leaf(Object::Integer(Integer::from_i64(n)))
}

fn parse_number_literal(text: &str) -> Result<Object, ErrorKind> {
    if text.contains('.') || text.contains('e') || text.contains('E') {
        let value: f64 = text.parse().map_err(|_| ErrorKind::SyntaxError)?;
        Ok(Object::Decimal(arithmetic::decimal_from_f64(value)))
    } else {
        Ok(Object::Integer(Integer::parse_decimal(text)?))
    }
}

/// Parse the text inside a `'...'` expression literal into an
/// [`Object::Expression`].
pub fn parse_infix(text: &str) -> Result<Object, ErrorKind> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = InfixParser { tokens, pos: 0 };
    let tree = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ErrorKind::SyntaxError);
    }
    Ok(Object::Expression(Box::new(tree)))
}

// ---------------------------------------------------------------------
// Substitution and evaluation
// ---------------------------------------------------------------------

/// Replace every free occurrence of `name` with `value`.
pub fn substitute(expr: &ExprNode<Object>, name: &str, value: &Object) -> ExprNode<Object> {
    expr.substitute(name, &ExprNode::Leaf(value.clone()))
}

/// Fully evaluate a tree with no remaining free symbols, resolving any
/// that do remain through `resolve` (a directory lookup, typically).
pub fn evaluate(
    expr: &ExprNode<Object>,
    resolve: &mut impl FnMut(&str) -> Option<Object>,
    precision: u32,
) -> Result<Object, ErrorKind> {
    match expr {
        ExprNode::Leaf(value) => Ok(value.clone()),
        ExprNode::Symbol(name) => resolve(name).ok_or(ErrorKind::UndefinedName),
        ExprNode::Apply { operator, args, .. } => {
            let values: Vec<Object> =
                args.iter().map(|a| evaluate(a, resolve, precision)).collect::<Result<_, _>>()?;
            apply_operator(operator, &values, precision)
        }
    }
}

fn apply_operator(operator: &str, args: &[Object], precision: u32) -> Result<Object, ErrorKind> {
    match (operator, args) {
        ("+", [a, b]) => arithmetic::binary_numeric(BinaryOp::Add, a, b, precision),
        ("-", [a, b]) => arithmetic::binary_numeric(BinaryOp::Sub, a, b, precision),
        ("*", [a, b]) => arithmetic::binary_numeric(BinaryOp::Mul, a, b, precision),
        ("/", [a, b]) => arithmetic::binary_numeric(BinaryOp::Div, a, b, precision),
        ("^", [a, b]) => arithmetic::pow(a, b, precision),
        ("XROOT", [a, b]) => arithmetic::xroot(a, b),
        ("neg", [a]) => arithmetic::neg(a),
        ("!", [a]) => arithmetic::factorial(a),
        ("SQRT", [a]) => arithmetic::sqrt(a),
        ("ABS", [a]) => arithmetic::abs(a),
        ("SIN", [a]) => arithmetic::transcendental(Transcendental::Sin, a),
        ("COS", [a]) => arithmetic::transcendental(Transcendental::Cos, a),
        ("TAN", [a]) => arithmetic::transcendental(Transcendental::Tan, a),
        ("ASIN", [a]) => arithmetic::transcendental(Transcendental::Asin, a),
        ("ACOS", [a]) => arithmetic::transcendental(Transcendental::Acos, a),
        ("ATAN", [a]) => arithmetic::transcendental(Transcendental::Atan, a),
        ("SINH", [a]) => arithmetic::transcendental(Transcendental::Sinh, a),
        ("COSH", [a]) => arithmetic::transcendental(Transcendental::Cosh, a),
        ("TANH", [a]) => arithmetic::transcendental(Transcendental::Tanh, a),
        ("EXP", [a]) => arithmetic::transcendental(Transcendental::Exp, a),
        ("LN", [a]) => arithmetic::transcendental(Transcendental::Ln, a),
        ("LOG10", [a]) => arithmetic::transcendental(Transcendental::Log10, a),
        _ => Err(ErrorKind::UndefinedOperation),
    }
}

// ---------------------------------------------------------------------
// Auto-simplification
// ---------------------------------------------------------------------

/// Constant-fold and apply a handful of identity rules bottom-up. Best
/// effort: a sub-tree that does not simplify is returned unchanged rather
/// than propagating the arithmetic error that blocked it, since a failed
/// simplification of one branch should not poison the whole tree.
pub fn auto_simplify(expr: &ExprNode<Object>) -> ExprNode<Object> {
    let expr = match expr {
        ExprNode::Apply { operator, arity, args } => {
            ExprNode::Apply { operator: operator.clone(), arity: *arity, args: args.iter().map(auto_simplify).collect() }
        }
        leaf_or_symbol => leaf_or_symbol.clone(),
    };
    let expr = apply_identities(expr);
    if let ExprNode::Apply { operator, args, .. } = &expr {
        if args.iter().all(|a| matches!(a, ExprNode::Leaf(_))) {
            let values: Vec<Object> = args
                .iter()
                .map(|a| match a {
                    ExprNode::Leaf(v) => v.clone(),
                    _ => unreachable!(),
                })
                .collect();
            if let Ok(folded) = apply_operator(operator, &values, DEFAULT_PRECISION) {
                return ExprNode::Leaf(folded);
            }
        }
    }
    expr
}

fn apply_identities(expr: ExprNode<Object>) -> ExprNode<Object> {
    match expr {
        ExprNode::Apply { ref operator, ref args, .. } if args.len() == 2 => {
            let (a, b) = (&args[0], &args[1]);
            match operator.as_str() {
                "+" if is_zero(a) => b.clone(),
                "+" if is_zero(b) => a.clone(),
                "-" if is_zero(b) => a.clone(),
                "*" if is_one(a) => b.clone(),
                "*" if is_one(b) => a.clone(),
                "*" if is_zero(a) || is_zero(b) => leaf_i64(0),
                "/" if is_one(b) => a.clone(),
                "^" if is_one(b) => a.clone(),
                "^" if is_zero(b) => leaf_i64(1),
                _ => expr,
            }
        }
        ExprNode::Apply { ref operator, ref args, .. } if args.len() == 1 && operator == "neg" => {
            if let ExprNode::Apply { operator: inner_op, args: inner_args, .. } = &args[0] {
                if inner_op == "neg" {
                    return inner_args[0].clone();
                }
            }
            expr
        }
        _ => expr,
    }
}

fn is_zero(node: &ExprNode<Object>) -> bool {
    matches!(node, ExprNode::Leaf(v) if v.is_numeric_zero())
}

fn is_one(node: &ExprNode<Object>) -> bool {
    matches!(node, ExprNode::Leaf(v) if v.is_numeric_one())
}

// ---------------------------------------------------------------------
// Symbolic differentiation (spec.md §4.7.3)
// ---------------------------------------------------------------------

/// `∂expr/∂var`, by structural recursion over a small table of rules.
/// Returns [`ErrorKind::UnknownDerivative`] for any shape outside that
/// table rather than guessing.
pub fn differentiate(expr: &ExprNode<Object>, var: &str) -> Result<ExprNode<Object>, ErrorKind> {
    match expr {
        ExprNode::Leaf(_) => Ok(leaf_i64(0)),
        ExprNode::Symbol(s) if s == var => Ok(leaf_i64(1)),
        ExprNode::Symbol(_) => Ok(leaf_i64(0)),
        ExprNode::Apply { operator, args, .. } => differentiate_apply(operator, args, var),
    }
}

fn differentiate_apply(operator: &str, args: &[ExprNode<Object>], var: &str) -> Result<ExprNode<Object>, ErrorKind> {
    match (operator, args) {
        ("+", [a, b]) => Ok(binary("+", differentiate(a, var)?, differentiate(b, var)?)),
        ("-", [a, b]) => Ok(binary("-", differentiate(a, var)?, differentiate(b, var)?)),
        ("neg", [a]) => Ok(unary("neg", differentiate(a, var)?)),
        ("*", [a, b]) => {
            let da = differentiate(a, var)?;
            let db = differentiate(b, var)?;
            Ok(binary("+", binary("*", da, b.clone()), binary("*", a.clone(), db)))
        }
        ("/", [a, b]) => {
            let da = differentiate(a, var)?;
            let db = differentiate(b, var)?;
            let numerator = binary("-", binary("*", da, b.clone()), binary("*", a.clone(), db));
            let denominator = binary("^", b.clone(), leaf_i64(2));
            Ok(binary("/", numerator, denominator))
        }
        ("^", [a, b]) if !contains_var(b, var) => {
            let da = differentiate(a, var)?;
            let exponent_minus_one = binary("-", b.clone(), leaf_i64(1));
            Ok(binary("*", binary("*", b.clone(), binary("^", a.clone(), exponent_minus_one)), da))
        }
        ("SIN", [u]) => Ok(binary("*", unary("COS", u.clone()), differentiate(u, var)?)),
        ("COS", [u]) => Ok(binary("*", unary("neg", unary("SIN", u.clone())), differentiate(u, var)?)),
        ("TAN", [u]) => {
            let du = differentiate(u, var)?;
            let cos_squared = binary("^", unary("COS", u.clone()), leaf_i64(2));
            Ok(binary("/", du, cos_squared))
        }
        ("EXP", [u]) => Ok(binary("*", unary("EXP", u.clone()), differentiate(u, var)?)),
        ("LN", [u]) => Ok(binary("/", differentiate(u, var)?, u.clone())),
        ("SQRT", [u]) => {
            let du = differentiate(u, var)?;
            let two_sqrt = binary("*", leaf_i64(2), unary("SQRT", u.clone()));
            Ok(binary("/", du, two_sqrt))
        }
        _ => Err(ErrorKind::UnknownDerivative),
    }
}

fn contains_var(node: &ExprNode<Object>, var: &str) -> bool {
    match node {
        ExprNode::Symbol(s) => s == var,
        ExprNode::Leaf(_) => false,
        ExprNode::Apply { args, .. } => args.iter().any(|a| contains_var(a, var)),
    }
}

// ---------------------------------------------------------------------
// Basic primitives / antiderivatives (spec.md §4.7.3)
// ---------------------------------------------------------------------

/// A basic antiderivative table for a handful of common shapes in `var`.
/// Returns [`ErrorKind::UnknownPrimitive`] outside that table.
pub fn primitive(expr: &ExprNode<Object>, var: &str) -> Result<ExprNode<Object>, ErrorKind> {
    match expr {
        ExprNode::Leaf(_) if !contains_var(expr, var) => Ok(binary("*", expr.clone(), ExprNode::Symbol(var.to_string()))),
        ExprNode::Leaf(_) => Err(ErrorKind::UnknownPrimitive),
        ExprNode::Symbol(s) if s == var => {
            Ok(binary("/", binary("^", expr.clone(), leaf_i64(2)), leaf_i64(2)))
        }
        ExprNode::Symbol(_) => Ok(binary("*", expr.clone(), ExprNode::Symbol(var.to_string()))),
        ExprNode::Apply { operator, args, .. } => primitive_apply(operator, args, var),
    }
}

fn primitive_apply(operator: &str, args: &[ExprNode<Object>], var: &str) -> Result<ExprNode<Object>, ErrorKind> {
    match (operator, args) {
        ("+", [a, b]) => Ok(binary("+", primitive(a, var)?, primitive(b, var)?)),
        ("-", [a, b]) => Ok(binary("-", primitive(a, var)?, primitive(b, var)?)),
        ("neg", [a]) => Ok(unary("neg", primitive(a, var)?)),
        ("^", [a, b]) if matches!(a, ExprNode::Symbol(s) if s == var) && !contains_var(b, var) => {
            if let ExprNode::Leaf(Object::Integer(n)) = b {
                if n.to_i64() == Some(-1) {
                    return Ok(unary("LN", a.clone()));
                }
            }
            let exponent_plus_one = binary("+", b.clone(), leaf_i64(1));
            Ok(binary("/", binary("^", a.clone(), exponent_plus_one.clone()), exponent_plus_one))
        }
        ("SIN", [u]) if matches!(u, ExprNode::Symbol(s) if s == var) => Ok(unary("neg", unary("COS", u.clone()))),
        ("COS", [u]) if matches!(u, ExprNode::Symbol(s) if s == var) => Ok(unary("SIN", u.clone())),
        ("EXP", [u]) if matches!(u, ExprNode::Symbol(s) if s == var) => Ok(unary("EXP", u.clone())),
        ("/", [a, b])
            if matches!(a, ExprNode::Leaf(v) if v.is_numeric_one()) && matches!(b, ExprNode::Symbol(s) if s == var) =>
        {
            Ok(unary("LN", b.clone()))
        }
        _ => Err(ErrorKind::UnknownPrimitive),
    }
}

// ---------------------------------------------------------------------
// Isolate (spec.md §4.7.4): peel the outermost operator off the side
// containing `var`, applying its inverse to the other side, until `var`
// stands alone.
// ---------------------------------------------------------------------

/// Solve `expr` (an equation `lhs = rhs`, or a bare expression taken to
/// mean `expr = 0`) for `var`.
pub fn isolate(expr: &ExprNode<Object>, var: &str) -> Result<ExprNode<Object>, ErrorKind> {
    let (lhs, rhs) = match expr {
        ExprNode::Apply { operator, args, .. } if operator == "=" && args.len() == 2 => {
            (args[0].clone(), args[1].clone())
        }
        other => (other.clone(), leaf_i64(0)),
    };
    let solved = isolate_rec(&lhs, &rhs, var)?;
    Ok(auto_simplify(&solved))
}

fn isolate_rec(lhs: &ExprNode<Object>, rhs: &ExprNode<Object>, var: &str) -> Result<ExprNode<Object>, ErrorKind> {
    if let ExprNode::Symbol(s) = lhs {
        if s == var {
            return Ok(rhs.clone());
        }
        return Err(ErrorKind::UnableToIsolate);
    }
    match lhs {
        ExprNode::Apply { operator, args, .. } if args.len() == 2 => {
            let (a, b) = (&args[0], &args[1]);
            let a_has = contains_var(a, var);
            let b_has = contains_var(b, var);
            if a_has && !b_has {
                let new_rhs = match operator.as_str() {
                    "+" => binary("-", rhs.clone(), b.clone()),
                    "-" => binary("+", rhs.clone(), b.clone()),
                    "*" => binary("/", rhs.clone(), b.clone()),
                    "/" => binary("*", rhs.clone(), b.clone()),
                    "^" => binary("XROOT", rhs.clone(), b.clone()),
                    _ => return Err(ErrorKind::UnableToIsolate),
                };
                isolate_rec(a, &new_rhs, var)
            } else if b_has && !a_has {
                let new_rhs = match operator.as_str() {
                    "+" => binary("-", rhs.clone(), a.clone()),
                    "-" => binary("-", a.clone(), rhs.clone()),
                    "*" => binary("/", rhs.clone(), a.clone()),
                    "/" => binary("/", a.clone(), rhs.clone()),
                    _ => return Err(ErrorKind::UnableToIsolate),
                };
                isolate_rec(b, &new_rhs, var)
            } else {
                Err(ErrorKind::UnableToIsolate)
            }
        }
        ExprNode::Apply { operator, args, .. } if args.len() == 1 => {
            let a = &args[0];
            let new_rhs = match operator.as_str() {
                "neg" => unary("neg", rhs.clone()),
                "SQRT" => binary("^", rhs.clone(), leaf_i64(2)),
                "SIN" => unary("ASIN", rhs.clone()),
                "COS" => unary("ACOS", rhs.clone()),
                "TAN" => unary("ATAN", rhs.clone()),
                "EXP" => unary("LN", rhs.clone()),
                "LN" => unary("EXP", rhs.clone()),
                _ => return Err(ErrorKind::UnableToIsolate),
            };
            isolate_rec(a, &new_rhs, var)
        }
        _ => Err(ErrorKind::UnableToIsolate),
    }
}

/// Isolate every name in `vars` in turn, for `ISOL`'s multi-variable form.
/// Fails as a whole with [`ErrorKind::UnableToSolveForAllVariables`] if
/// any single variable cannot be isolated.
pub fn solve_for_all(expr: &ExprNode<Object>, vars: &[&str]) -> Result<Vec<(String, ExprNode<Object>)>, ErrorKind> {
    let mut solutions = Vec::with_capacity(vars.len());
    for &var in vars {
        match isolate(expr, var) {
            Ok(solved) => solutions.push((var.to_string(), solved)),
            Err(_) => return Err(ErrorKind::UnableToSolveForAllVariables),
        }
    }
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn sym(name: &str) -> ExprNode<Object> {
        ExprNode::Symbol(name.to_string())
    }

    #[test]
    fn parses_a_simple_sum_with_precedence() {
        let parsed = parse_infix("1+2*3").unwrap();
        match parsed {
            Object::Expression(tree) => {
                let simplified = auto_simplify(&tree);
                assert_eq!(simplified, ExprNode::Leaf(Object::Integer(Integer::from_i64(7))));
            }
            _ => panic!("expected an expression"),
        }
    }

    #[test]
    fn parses_a_function_call_and_unary_minus() {
        let parsed = parse_infix("SIN(-X)").unwrap();
        match parsed {
            Object::Expression(tree) => {
                assert_eq!(
                    *tree,
                    ExprNode::Apply {
                        operator: "SIN".to_string(),
                        arity: Arity::Fixed(1),
                        args: vec![unary("neg", sym("X"))],
                    }
                );
            }
            _ => panic!("expected an expression"),
        }
    }

    #[test]
    fn rejects_unterminated_input() {
        assert_eq!(parse_infix("1+(2*3"), Err(ErrorKind::SyntaxError));
    }

    #[test]
    fn auto_simplify_drops_additive_identity() {
        let expr = binary("+", sym("X"), leaf_i64(0));
        assert_eq!(auto_simplify(&expr), sym("X"));
    }

    #[test]
    fn auto_simplify_collapses_double_negation() {
        let expr = unary("neg", unary("neg", sym("X")));
        assert_eq!(auto_simplify(&expr), sym("X"));
    }

    #[test]
    fn differentiates_a_product_of_powers() {
        let expr = binary("*", sym("X"), binary("^", sym("X"), leaf_i64(2)));
        let derivative = differentiate(&expr, "X").unwrap();
        let evaluated_at_two = substitute(&auto_simplify(&derivative), "X", &Object::Integer(Integer::from_i64(2)));
        let mut resolve = |_: &str| None;
        let value = evaluate(&auto_simplify(&evaluated_at_two), &mut resolve, DEFAULT_PRECISION).unwrap();
        assert_eq!(value, Object::Integer(Integer::from_i64(12)));
    }

    #[test]
    fn isolates_a_linear_equation() {
        let equation = binary("=", binary("+", binary("*", leaf_i64(2), sym("X")), leaf_i64(3)), leaf_i64(11));
        let solved = isolate(&equation, "X").unwrap();
        assert_eq!(solved, ExprNode::Leaf(Object::Integer(Integer::from_i64(4))));
    }

    #[test]
    fn isolate_reports_when_no_rule_applies() {
        let equation = binary("=", unary("ABS", sym("X")), leaf_i64(5));
        assert_eq!(isolate(&equation, "X"), Err(ErrorKind::UnableToIsolate));
    }

    #[test]
    fn solve_for_all_fails_together_when_one_variable_cannot_be_isolated() {
        let equation = binary("=", unary("ABS", sym("X")), sym("Y"));
        assert_eq!(solve_for_all(&equation, &["X", "Y"]), Err(ErrorKind::UnableToSolveForAllVariables));
    }

    #[test]
    fn primitive_of_x_squared_is_x_cubed_over_three() {
        let expr = binary("^", sym("X"), leaf_i64(2));
        let antiderivative = auto_simplify(&primitive(&expr, "X").unwrap());
        assert_eq!(antiderivative, binary("/", binary("^", sym("X"), leaf_i64(3)), leaf_i64(3)));
    }
}
