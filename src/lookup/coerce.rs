//! Typed coercion of resolved nodes.
//!
//! # Conversion Table
//! ```text
//! target        accepts
//! bool          Bool, String (1/t/T/TRUE/true/True, 0/f/F/FALSE/false/False)
//! f64           Number, String (decimal float)
//! i64           Number without fractional part, String (decimal integer)
//! String        String, Bool, Number (shortest decimal form)
//! Vec<Node>     List
//! Vec<String>   List; Null and non-scalar elements become "" (logged)
//! ```
//!
//! Every conversion is a pure function of the node.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::tree::{Node, NodeKind};

/// Error raised when a node cannot satisfy the requested type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: NodeKind,
    },

    #[error("invalid bool literal {0:?}")]
    InvalidBool(String),

    #[error("invalid float {value:?}: {source}")]
    InvalidFloat {
        value: String,
        source: ParseFloatError,
    },

    #[error("invalid int {value:?}: {source}")]
    InvalidInt {
        value: String,
        source: ParseIntError,
    },

    #[error("value can't be converted to int: {0}")]
    NotIntegral(f64),
}

/// Types a resolved node can be coerced into.
pub trait FromNode: Sized {
    /// Name used in type mismatch errors.
    const EXPECTED: &'static str;

    fn from_node(node: &Node) -> Result<Self, CoercionError>;
}

fn mismatch<T: FromNode>(node: &Node) -> CoercionError {
    CoercionError::TypeMismatch {
        expected: T::EXPECTED,
        found: node.kind(),
    }
}

/// Parse a boolean literal the way `strconv`-style parsers do.
pub fn parse_bool(text: &str) -> Result<bool, CoercionError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionError::InvalidBool(text.to_string())),
    }
}

/// Format a number in its shortest decimal form (`3.0` renders as `3`).
pub fn format_number(n: f64) -> String {
    n.to_string()
}

impl FromNode for bool {
    const EXPECTED: &'static str = "bool or string";

    fn from_node(node: &Node) -> Result<Self, CoercionError> {
        match node {
            Node::Bool(b) => Ok(*b),
            Node::String(s) => parse_bool(s),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromNode for f64 {
    const EXPECTED: &'static str = "number or string";

    fn from_node(node: &Node) -> Result<Self, CoercionError> {
        match node {
            Node::Number(n) => Ok(*n),
            Node::String(s) => s.parse().map_err(|source| CoercionError::InvalidFloat {
                value: s.clone(),
                source,
            }),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromNode for i64 {
    const EXPECTED: &'static str = "number or string";

    fn from_node(node: &Node) -> Result<Self, CoercionError> {
        match node {
            Node::Number(n) => {
                // i64::MAX as f64 rounds up to 2^63, which is out of range.
                let in_range = *n >= i64::MIN as f64 && *n < i64::MAX as f64;
                if n.is_finite() && n.fract() == 0.0 && in_range {
                    Ok(*n as i64)
                } else {
                    Err(CoercionError::NotIntegral(*n))
                }
            }
            Node::String(s) => s.parse().map_err(|source| CoercionError::InvalidInt {
                value: s.clone(),
                source,
            }),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromNode for String {
    const EXPECTED: &'static str = "bool, number or string";

    fn from_node(node: &Node) -> Result<Self, CoercionError> {
        match node {
            Node::Bool(b) => Ok(b.to_string()),
            Node::Number(n) => Ok(format_number(*n)),
            Node::String(s) => Ok(s.clone()),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromNode for Vec<Node> {
    const EXPECTED: &'static str = "list";

    fn from_node(node: &Node) -> Result<Self, CoercionError> {
        match node {
            Node::List(items) => Ok(items.clone()),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromNode for Vec<String> {
    const EXPECTED: &'static str = "list";

    fn from_node(node: &Node) -> Result<Self, CoercionError> {
        let Node::List(items) = node else {
            return Err(mismatch::<Self>(node));
        };
        let strings = items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Node::Null => String::new(),
                other => String::from_node(other).unwrap_or_else(|e| {
                    tracing::error!(index, error = %e, "Unable to cast list element to string");
                    String::new()
                }),
            })
            .collect();
        Ok(strings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_bool() {
        assert_eq!(bool::from_node(&Node::Bool(true)), Ok(true));
        assert_eq!(bool::from_node(&"true".into()), Ok(true));
        assert_eq!(bool::from_node(&"F".into()), Ok(false));
        assert_eq!(bool::from_node(&"0".into()), Ok(false));
        assert_eq!(
            bool::from_node(&"notabool".into()),
            Err(CoercionError::InvalidBool("notabool".into()))
        );
        assert_eq!(
            bool::from_node(&Node::Number(1.0)),
            Err(CoercionError::TypeMismatch {
                expected: "bool or string",
                found: NodeKind::Number
            })
        );
    }

    #[test]
    fn test_float() {
        assert_eq!(f64::from_node(&Node::Number(2.5)), Ok(2.5));
        assert_eq!(f64::from_node(&"1e3".into()), Ok(1000.0));
        assert!(matches!(
            f64::from_node(&"abc".into()),
            Err(CoercionError::InvalidFloat { .. })
        ));
        assert!(matches!(
            f64::from_node(&Node::Null),
            Err(CoercionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_int() {
        assert_eq!(i64::from_node(&Node::Number(3.0)), Ok(3));
        assert_eq!(i64::from_node(&Node::Number(-42.0)), Ok(-42));
        assert_eq!(i64::from_node(&Node::Number(1e6)), Ok(1_000_000));
        assert_eq!(
            i64::from_node(&Node::Number(3.5)),
            Err(CoercionError::NotIntegral(3.5))
        );
        assert!(i64::from_node(&Node::Number(1e30)).is_err());
        assert!(i64::from_node(&Node::Number(f64::INFINITY)).is_err());
        assert_eq!(i64::from_node(&"17".into()), Ok(17));
        assert!(matches!(
            i64::from_node(&"17.5".into()),
            Err(CoercionError::InvalidInt { .. })
        ));
        assert!(matches!(
            i64::from_node(&Node::List(vec![])),
            Err(CoercionError::TypeMismatch {
                found: NodeKind::List,
                ..
            })
        ));
    }

    #[test]
    fn test_string() {
        assert_eq!(String::from_node(&Node::Bool(true)), Ok("true".into()));
        assert_eq!(String::from_node(&Node::Number(3.0)), Ok("3".into()));
        assert_eq!(String::from_node(&Node::Number(0.25)), Ok("0.25".into()));
        assert_eq!(String::from_node(&"x".into()), Ok("x".into()));
        for node in [Node::Null, Node::List(vec![]), Node::Map(BTreeMap::new())] {
            assert!(matches!(
                String::from_node(&node),
                Err(CoercionError::TypeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_lists() {
        let list = Node::List(vec!["a".into(), Node::Number(2.0), Node::Null, Node::Bool(false)]);
        assert_eq!(Vec::<Node>::from_node(&list).unwrap().len(), 4);
        assert_eq!(
            Vec::<String>::from_node(&list).unwrap(),
            vec!["a", "2", "", "false"]
        );

        let nested = Node::List(vec![
            "a".into(),
            Node::List(vec![Node::Number(1.0), Node::Number(2.0)]),
            Node::Map(BTreeMap::new()),
            "b".into(),
        ]);
        assert_eq!(
            Vec::<String>::from_node(&nested).unwrap(),
            vec!["a", "", "", "b"]
        );
        assert!(Vec::<Node>::from_node(&"a".into()).is_err());
    }
}
