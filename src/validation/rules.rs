//! Declarative field rules.
//!
//! Each request type declares a static table of `Rule`s: a field name, a
//! constraint, the groups under which the constraint is active, and an
//! accessor projecting the field out of the request. The engine interprets
//! the table; no reflection, no derive magic.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use super::groups::RuleGroup;
use crate::types::ErrorDetail;

/// A field value as seen by the constraint interpreter.
///
/// `Missing` covers both an absent JSON key and an explicit null.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Str(&'a str),
    Int(i64),
    Decimal(Decimal),
}

impl<'a> FieldValue<'a> {
    pub fn from_text(value: Option<&'a str>) -> Self {
        match value {
            Some(s) => FieldValue::Str(s),
            None => FieldValue::Missing,
        }
    }

    pub fn from_int(value: Option<i64>) -> Self {
        match value {
            Some(i) => FieldValue::Int(i),
            None => FieldValue::Missing,
        }
    }

    pub fn from_decimal(value: Option<Decimal>) -> Self {
        match value {
            Some(d) => FieldValue::Decimal(d),
            None => FieldValue::Missing,
        }
    }

    /// JSON rendering of the value for the `rejectedValue` error field.
    fn to_rejected(&self) -> Option<Value> {
        match self {
            FieldValue::Missing => None,
            FieldValue::Str(s) => Some(json!(s)),
            FieldValue::Int(i) => Some(json!(i)),
            FieldValue::Decimal(d) => Some(
                d.to_f64()
                    .map(|f| json!(f))
                    .unwrap_or_else(|| json!(d.to_string())),
            ),
        }
    }
}

/// A constraint kind plus its parameters.
///
/// `Required` fails on missing values only. `NotBlank` fails on missing or
/// whitespace-only text. Every other kind skips missing and blank values so
/// a blank field reports exactly one error.
#[derive(Debug, Clone)]
pub enum Constraint {
    Required,
    NotBlank,
    Length { min: usize, max: usize },
    Pattern { regex: &'static Lazy<Regex>, message: &'static str },
    DecimalMin { value: Decimal, inclusive: bool },
    DecimalMax { value: Decimal, inclusive: bool },
    Digits { integer: u32, fraction: u32 },
    Positive,
}

impl Constraint {
    /// Machine-readable code attached to the resulting error detail.
    pub fn code(&self) -> &'static str {
        match self {
            Constraint::Required => "REQUIRED",
            Constraint::NotBlank => "NOT_BLANK",
            Constraint::Length { .. } => "LENGTH",
            Constraint::Pattern { .. } => "PATTERN",
            Constraint::DecimalMin { .. } => "DECIMAL_MIN",
            Constraint::DecimalMax { .. } => "DECIMAL_MAX",
            Constraint::Digits { .. } => "DIGITS",
            Constraint::Positive => "POSITIVE",
        }
    }

    /// Evaluate against a field value, producing at most one error detail.
    pub fn check(&self, field: &str, value: &FieldValue<'_>) -> Option<ErrorDetail> {
        match self {
            Constraint::Required => match value {
                FieldValue::Missing => Some(self.fail(field, value, format!("{field} is required"))),
                _ => None,
            },
            Constraint::NotBlank => match value {
                FieldValue::Missing => {
                    Some(self.fail(field, value, format!("{field} must not be blank")))
                }
                FieldValue::Str(s) if s.trim().is_empty() => {
                    Some(self.fail(field, value, format!("{field} must not be blank")))
                }
                _ => None,
            },
            _ => self.check_present(field, value),
        }
    }

    /// Constraints that only apply to present, non-blank values.
    fn check_present(&self, field: &str, value: &FieldValue<'_>) -> Option<ErrorDetail> {
        match value {
            FieldValue::Missing => return None,
            FieldValue::Str(s) if s.trim().is_empty() => return None,
            _ => {}
        }

        match self {
            Constraint::Length { min, max } => {
                let FieldValue::Str(s) = value else { return None };
                let len = s.chars().count();
                if len < *min || len > *max {
                    let message = if *min > 0 {
                        format!("{field} must be between {min} and {max} characters")
                    } else {
                        format!("{field} must be at most {max} characters")
                    };
                    Some(self.fail(field, value, message))
                } else {
                    None
                }
            }
            Constraint::Pattern { regex, message } => {
                let FieldValue::Str(s) = value else { return None };
                if regex.is_match(s) {
                    None
                } else {
                    Some(self.fail(field, value, format!("{field} {message}")))
                }
            }
            Constraint::DecimalMin { value: min, inclusive } => {
                let actual = value.as_decimal()?;
                let passes = if *inclusive { actual >= *min } else { actual > *min };
                if passes {
                    None
                } else {
                    let bound = if *inclusive {
                        format!("{field} must be greater than or equal to {min}")
                    } else {
                        format!("{field} must be greater than {min}")
                    };
                    Some(self.fail(field, value, bound))
                }
            }
            Constraint::DecimalMax { value: max, inclusive } => {
                let actual = value.as_decimal()?;
                let passes = if *inclusive { actual <= *max } else { actual < *max };
                if passes {
                    None
                } else {
                    let bound = if *inclusive {
                        format!("{field} must be less than or equal to {max}")
                    } else {
                        format!("{field} must be less than {max}")
                    };
                    Some(self.fail(field, value, bound))
                }
            }
            Constraint::Digits { integer, fraction } => {
                let actual = value.as_decimal()?;
                if integer_digits(&actual) > *integer || fraction_digits(&actual) > *fraction {
                    Some(self.fail(
                        field,
                        value,
                        format!(
                            "{field} must have at most {integer} integer digits and {fraction} decimal places"
                        ),
                    ))
                } else {
                    None
                }
            }
            Constraint::Positive => {
                let positive = match value {
                    FieldValue::Int(i) => *i > 0,
                    FieldValue::Decimal(d) => d.is_sign_positive() && !d.is_zero(),
                    _ => return None,
                };
                if positive {
                    None
                } else {
                    Some(self.fail(field, value, format!("{field} must be a positive number")))
                }
            }
            Constraint::Required | Constraint::NotBlank => None,
        }
    }

    fn fail(&self, field: &str, value: &FieldValue<'_>, message: String) -> ErrorDetail {
        ErrorDetail::field(field, self.code(), message, value.to_rejected())
    }
}

impl FieldValue<'_> {
    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Int(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }
}

/// Digits to the left of the decimal point, counting zero as one digit.
fn integer_digits(value: &Decimal) -> u32 {
    let integral = value.abs().trunc();
    if integral.is_zero() {
        1
    } else {
        integral.normalize().to_string().len() as u32
    }
}

/// Significant digits to the right of the decimal point.
fn fraction_digits(value: &Decimal) -> u32 {
    value.normalize().scale()
}

/// Accessor projecting one field out of a request object.
pub type Accessor<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// One declared rule: field, constraint, active groups, accessor.
pub struct Rule<T> {
    pub field: &'static str,
    pub constraint: Constraint,
    pub groups: &'static [RuleGroup],
    pub accessor: Accessor<T>,
}

impl<T> Rule<T> {
    pub fn new(
        field: &'static str,
        constraint: Constraint,
        groups: &'static [RuleGroup],
        accessor: Accessor<T>,
    ) -> Self {
        Self {
            field,
            constraint,
            groups,
            accessor,
        }
    }
}

/// A request type with a declared rule table.
///
/// `GROUPS` is the scope the request pipeline validates under; `rules()`
/// returns the table in declaration order, which fixes error ordering.
pub trait Validate: Sized {
    const GROUPS: &'static [RuleGroup];

    fn rules() -> &'static [Rule<Self>];
}
