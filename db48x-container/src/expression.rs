//! Algebraic expression trees (spec.md §4.4, §6.3): an operator tree over
//! leaves of type `T`, with fixed-arity nodes for ordinary operators and
//! explicit N-ary nodes for the variable-arity forms (`Σ`/`∏`/`∫`/`Root`/
//! user-function calls).

use alloc::{
    string::String,
    vec::Vec,
};
use db48x_object::ErrorKind;

/// How many operands a node's operator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` operands (unary negation, binary `+`, ternary `ifte`...).
    Fixed(usize),
    /// Any number of operands, as with `Σ`/`∏`/`∫`/`Root`/user-function
    /// calls whose argument count is only known at the call site.
    Variadic,
}

impl Arity {
    /// Whether `count` operands satisfy this arity.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => *n == count,
            Arity::Variadic => true,
        }
    }
}

/// A node in an algebraic expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode<T> {
    /// A literal value.
    Leaf(T),
    /// A free or bound variable name.
    Symbol(String),
    /// An operator or function applied to its operands, left to right.
    Apply {
        /// The operator or function name (`"+"`, `"SIN"`, `"Σ"`, a
        /// user-defined function name, ...).
        operator: String,
        /// The operator's expected operand count.
        arity: Arity,
        /// The operand sub-trees.
        args: Vec<ExprNode<T>>,
    },
}

impl<T> ExprNode<T> {
    /// Build an application node, checking the operand count against
    /// `arity` up front.
    pub fn apply(operator: String, arity: Arity, args: Vec<ExprNode<T>>) -> Result<Self, ErrorKind> {
        if !arity.accepts(args.len()) {
            return Err(ErrorKind::WrongArgumentCount);
        }
        Ok(ExprNode::Apply { operator, arity, args })
    }

    /// `true` for a `Leaf` or `Symbol` node with no children.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExprNode::Leaf(_) | ExprNode::Symbol(_))
    }

    /// The direct operands of an `Apply` node, empty otherwise.
    pub fn args(&self) -> &[ExprNode<T>] {
        match self {
            ExprNode::Apply { args, .. } => args,
            _ => &[],
        }
    }

    /// The total node count of the tree rooted here, used to bound
    /// recursive-descent work against the runtime's recursion budget.
    pub fn size(&self) -> usize {
        1 + self.args().iter().map(ExprNode::size).sum::<usize>()
    }

    /// Depth-first substitution of every `Symbol(name)` leaf matching
    /// `name` with a fresh copy of `replacement`.
    pub fn substitute(&self, name: &str, replacement: &ExprNode<T>) -> Self
    where
        T: Clone,
    {
        match self {
            ExprNode::Symbol(s) if s == name => replacement.clone(),
            ExprNode::Leaf(_) | ExprNode::Symbol(_) => self.clone(),
            ExprNode::Apply { operator, arity, args } => ExprNode::Apply {
                operator: operator.clone(),
                arity: *arity,
                args: args.iter().map(|a| a.substitute(name, replacement)).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{
        string::ToString,
        vec,
    };

    #[test]
    fn apply_rejects_a_mismatched_operand_count() {
        let result: Result<ExprNode<i64>, ErrorKind> =
            ExprNode::apply("+".to_string(), Arity::Fixed(2), vec![ExprNode::Leaf(1)]);
        assert_eq!(result, Err(ErrorKind::WrongArgumentCount));
    }

    #[test]
    fn variadic_nodes_accept_any_operand_count() {
        let sum = ExprNode::apply(
            "Σ".to_string(),
            Arity::Variadic,
            vec![ExprNode::Leaf(1), ExprNode::Leaf(2), ExprNode::Leaf(3)],
        );
        assert!(sum.is_ok());
    }

    #[test]
    fn substitute_replaces_matching_symbols_only() {
        let expr: ExprNode<i64> = ExprNode::apply(
            "+".to_string(),
            Arity::Fixed(2),
            vec![ExprNode::Symbol("x".to_string()), ExprNode::Symbol("y".to_string())],
        )
        .unwrap();
        let replaced = expr.substitute("x", &ExprNode::Leaf(5));
        assert_eq!(
            replaced,
            ExprNode::Apply {
                operator: "+".to_string(),
                arity: Arity::Fixed(2),
                args: vec![ExprNode::Leaf(5), ExprNode::Symbol("y".to_string())],
            }
        );
    }

    #[test]
    fn size_counts_every_node_in_the_tree() {
        let expr: ExprNode<i64> =
            ExprNode::apply("NEG".to_string(), Arity::Fixed(1), vec![ExprNode::Leaf(1)]).unwrap();
        assert_eq!(expr.size(), 2);
    }
}
