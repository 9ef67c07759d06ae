//! Rule-table interpreter.
//!
//! Pure functions of (object, requested groups, declared rules). Rules are
//! evaluated in declaration order and every failing rule reports, so one
//! field can surface several errors in a single pass.

use super::groups::{effective_groups, RuleGroup};
use super::rules::{Rule, Validate};
use crate::types::ErrorDetail;

/// Validate an object under the requested groups.
///
/// A rule runs when its group tags intersect the transitive closure of the
/// requested set. With no group requested, only untagged rules run.
pub fn validate<T: Validate + 'static>(value: &T, groups: &[RuleGroup]) -> Vec<ErrorDetail> {
    let effective = effective_groups(groups);

    T::rules()
        .iter()
        .filter(|rule| rule_applies(rule, groups, &effective))
        .filter_map(|rule| rule.constraint.check(rule.field, &(rule.accessor)(value)))
        .collect()
}

/// Validate a possibly-absent object.
///
/// An absent object yields exactly one general error instead of a field list.
pub fn validate_nullable<T: Validate + 'static>(
    value: Option<&T>,
    groups: &[RuleGroup],
) -> Vec<ErrorDetail> {
    match value {
        Some(value) => validate(value, groups),
        None => vec![ErrorDetail::general("Request object must not be null")],
    }
}

fn rule_applies<T>(rule: &Rule<T>, requested: &[RuleGroup], effective: &[RuleGroup]) -> bool {
    if requested.is_empty() {
        return rule.groups.is_empty();
    }
    rule.groups.iter().any(|tag| effective.contains(tag))
}
