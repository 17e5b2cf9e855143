//! Requirement operators and single requirement items

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::version::{ParseError, Version};

lazy_static! {
    // Longest alternatives first so `<=` is not consumed as `<`.
    static ref REQUIREMENT_RE: Regex =
        Regex::new(r"^(<=|<|==|=|>=|>|!=|~=|\^|~)?(\d.*)$").unwrap();
}

/// Comparison operators for requirement items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Matches any version (*)
    Any,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Equal (==); `=` and a bare version alias to this
    Equal,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Not equal (!=)
    NotEqual,
    /// Caret range (^), bounded at the first nonzero component
    Caret,
    /// Tilde range (~), bounded at the next minor
    Tilde,
    /// Compatible range (~=), boundary depends on patch presence
    Compatible,
}

impl Operator {
    /// Parse an operator from its symbol, resolving the `=` and empty
    /// aliases to `Equal`.
    pub fn from_symbol(symbol: &str) -> Result<Self, ParseError> {
        match symbol {
            "*" => Ok(Operator::Any),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            "" | "=" | "==" => Ok(Operator::Equal),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            "!=" => Ok(Operator::NotEqual),
            "^" => Ok(Operator::Caret),
            "~" => Ok(Operator::Tilde),
            "~=" => Ok(Operator::Compatible),
            _ => Err(ParseError::MalformedRequirement(symbol.to_string())),
        }
    }

    /// Canonical symbol for the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Any => "*",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::NotEqual => "!=",
            Operator::Caret => "^",
            Operator::Tilde => "~",
            Operator::Compatible => "~=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One operator plus operand pair from a requirement string, e.g. `>=1.2`.
///
/// The operand is absent only for the wildcard operator.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementItem {
    operator: Operator,
    operand: Option<Version>,
}

impl RequirementItem {
    /// Parse a single requirement token such as `>=1.2`, `^1.4.0` or `*`.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        if token.is_empty() {
            return Err(ParseError::MalformedRequirement(token.to_string()));
        }

        if token == "*" {
            return Ok(RequirementItem {
                operator: Operator::Any,
                operand: None,
            });
        }

        let caps = REQUIREMENT_RE
            .captures(token)
            .ok_or_else(|| ParseError::MalformedRequirement(token.to_string()))?;

        let operator = Operator::from_symbol(caps.get(1).map_or("", |m| m.as_str()))?;
        let operand = Version::parse(&caps[2])?;

        Ok(RequirementItem {
            operator,
            operand: Some(operand),
        })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> Option<&Version> {
        self.operand.as_ref()
    }

    /// Check whether a version satisfies this requirement.
    pub fn matches(&self, version: &Version) -> bool {
        let operand = match &self.operand {
            Some(operand) => operand,
            None => return true,
        };

        match self.operator {
            Operator::Any => true,
            Operator::LessThan => version < operand,
            Operator::LessThanOrEqual => version <= operand,
            Operator::Equal => version == operand,
            Operator::GreaterThanOrEqual => version >= operand,
            Operator::GreaterThan => version > operand,
            Operator::NotEqual => version != operand,
            Operator::Caret => {
                // Boundary sits at the first nonzero-by-significance component
                let upper = if operand.major() != 0 {
                    operand.next_major()
                } else if operand.minor() != 0 {
                    operand.next_minor()
                } else {
                    operand.next_patch()
                };
                operand <= version && *version < upper
            }
            Operator::Tilde => {
                let upper = operand.next_minor();
                operand <= version && *version < upper
            }
            Operator::Compatible => {
                // An operand without an explicit patch pins only the major line
                let upper = if operand.patch().is_some() {
                    operand.next_minor()
                } else {
                    operand.next_major()
                };
                operand <= version && *version < upper
            }
        }
    }
}

impl fmt::Display for RequirementItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Some(operand) => write!(f, "{}{}", self.operator.as_str(), operand.raw()),
            None => write!(f, "{}", self.operator.as_str()),
        }
    }
}
