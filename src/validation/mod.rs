//! Declarative request validation.
//!
//! Request types declare a static rule table (field, constraint, groups,
//! accessor) and the engine interprets it. Validation scope is chosen per
//! operation through rule groups: `Create` and `Update` both imply `Basic`.
//!
//! The engine is pure and deterministic: same object, same groups, same
//! error list, in rule declaration order.

pub mod engine;
mod groups;
mod rules;

pub use groups::RuleGroup;
pub use rules::{Accessor, Constraint, FieldValue, Rule, Validate};
