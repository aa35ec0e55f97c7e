//! Rule expressions and the builder that assembles them
//!
//! A [`RuleExpression`] is the domain-level submission shape: either a
//! single rule fragment (the create path) or several fragments joined by
//! connectives (the combine path). The two paths map to two distinct server
//! endpoints with different payloads, so the structural branch lives here
//! and callers never pick the wrong shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// The logical connectives the service accepts between rule fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Both sides must hold
    And,
    /// Either side may hold
    Or,
    /// Exactly one side holds
    Xor,
    /// Negated AND
    Nand,
    /// Negated OR
    Nor,
    /// Negated XOR
    Xnor,
}

impl Operator {
    /// All connectives, in the order the original UI offered them.
    pub const ALL: [Operator; 6] = [
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Nand,
        Operator::Nor,
        Operator::Xnor,
    ];

    /// Wire form of the connective.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Nand => "NAND",
            Operator::Nor => "NOR",
            Operator::Xnor => "XNOR",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Operator::And),
            "OR" => Ok(Operator::Or),
            "XOR" => Ok(Operator::Xor),
            "NAND" => Ok(Operator::Nand),
            "NOR" => Ok(Operator::Nor),
            "XNOR" => Ok(Operator::Xnor),
            other => Err(CoreError::UnknownOperator(other.to_string())),
        }
    }
}

/// A named rule ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleExpression {
    /// Exactly one rule fragment - submitted to the create endpoint.
    Single {
        /// Rule name
        name: String,
        /// The rule text
        rule: String,
    },
    /// Two or more fragments joined by connectives - submitted to the
    /// combine endpoint. `operators[j]` sits between `rules[j]` and
    /// `rules[j + 1]`, so `operators.len() == rules.len() - 1` always.
    Combined {
        /// Rule name
        name: String,
        /// The independent rule fragments, in order
        rules: Vec<String>,
        /// The connectives between consecutive fragments
        operators: Vec<Operator>,
    },
}

impl RuleExpression {
    /// The rule's name, whichever shape it takes.
    pub fn name(&self) -> &str {
        match self {
            RuleExpression::Single { name, .. } => name,
            RuleExpression::Combined { name, .. } => name,
        }
    }
}

/// Accumulates rule fragments and connectives, then validates and produces
/// the right [`RuleExpression`] shape.
///
/// ```
/// use ruleit_core::{ExpressionBuilder, Operator, RuleExpression};
///
/// let expr = ExpressionBuilder::new("adults_in_blue")
///     .fragment("age > 18")
///     .operator(Operator::And)
///     .fragment("color = blue")
///     .build()
///     .unwrap();
/// assert!(matches!(expr, RuleExpression::Combined { .. }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpressionBuilder {
    name: String,
    fragments: Vec<String>,
    operators: Vec<Operator>,
}

impl ExpressionBuilder {
    /// Start building a rule with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fragments: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Append a rule fragment.
    pub fn fragment(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(text.into());
        self
    }

    /// Append a connective between the previous fragment and the next.
    pub fn operator(mut self, op: Operator) -> Self {
        self.operators.push(op);
        self
    }

    /// Validate counts and produce the expression.
    ///
    /// Exactly one fragment always yields [`RuleExpression::Single`], never
    /// the combined shape. Fails when no fragment was added, or when the
    /// operator count is not one less than the fragment count; a failed
    /// build performs no network call and mutates nothing.
    pub fn build(self) -> Result<RuleExpression> {
        if self.fragments.is_empty() {
            return Err(CoreError::EmptyExpression);
        }
        if self.operators.len() != self.fragments.len() - 1 {
            return Err(CoreError::OperatorCountMismatch {
                fragments: self.fragments.len(),
                operators: self.operators.len(),
            });
        }
        if self.fragments.len() == 1 {
            let mut fragments = self.fragments;
            Ok(RuleExpression::Single {
                name: self.name,
                rule: fragments.remove(0),
            })
        } else {
            Ok(RuleExpression::Combined {
                name: self.name,
                rules: self.fragments,
                operators: self.operators,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parses_case_insensitively() {
        assert_eq!("AND".parse::<Operator>().unwrap(), Operator::And);
        assert_eq!("nor".parse::<Operator>().unwrap(), Operator::Nor);
        assert_eq!(" Xnor ".parse::<Operator>().unwrap(), Operator::Xnor);
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = "NOT".parse::<Operator>().unwrap_err();
        assert_eq!(err, CoreError::UnknownOperator("NOT".to_string()));
    }

    #[test]
    fn test_operator_round_trips_through_display() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_single_fragment_builds_create_shape() {
        let expr = ExpressionBuilder::new("r1")
            .fragment("age > 18")
            .build()
            .unwrap();
        assert_eq!(
            expr,
            RuleExpression::Single {
                name: "r1".to_string(),
                rule: "age > 18".to_string(),
            }
        );
    }

    #[test]
    fn test_multiple_fragments_build_combine_shape() {
        let expr = ExpressionBuilder::new("r2")
            .fragment("a > 10")
            .operator(Operator::And)
            .fragment("b < 5")
            .operator(Operator::Or)
            .fragment("c = 20")
            .build()
            .unwrap();
        match expr {
            RuleExpression::Combined {
                name,
                rules,
                operators,
            } => {
                assert_eq!(name, "r2");
                assert_eq!(rules, vec!["a > 10", "b < 5", "c = 20"]);
                // operators[j] joins rules[j] and rules[j + 1]
                assert_eq!(operators, vec![Operator::And, Operator::Or]);
            }
            other => panic!("expected combined shape, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_builder_is_rejected() {
        let err = ExpressionBuilder::new("empty").build().unwrap_err();
        assert_eq!(err, CoreError::EmptyExpression);
    }

    #[test]
    fn test_operator_count_mismatch_is_rejected() {
        let err = ExpressionBuilder::new("bad")
            .fragment("a > 1")
            .fragment("b > 2")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::OperatorCountMismatch {
                fragments: 2,
                operators: 0,
            }
        );
    }

    #[test]
    fn test_trailing_operator_is_rejected() {
        let err = ExpressionBuilder::new("bad")
            .fragment("a > 1")
            .operator(Operator::And)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::OperatorCountMismatch {
                fragments: 1,
                operators: 1,
            }
        );
    }
}
