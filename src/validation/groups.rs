//! Validation rule groups.
//!
//! A rule group is a named scope selecting which declared constraints apply
//! to an operation. Groups are static and compose hierarchically: `Create`
//! and `Update` each imply `Basic`, so validating under either also runs
//! every `Basic` rule.

/// Named validation scope a rule can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleGroup {
    /// Baseline rules shared by every write operation.
    Basic,
    /// Rules for resource creation. Implies `Basic`.
    Create,
    /// Rules for resource updates. Implies `Basic`.
    Update,
}

impl RuleGroup {
    /// Groups directly implied by this one.
    pub fn implies(self) -> &'static [RuleGroup] {
        match self {
            RuleGroup::Create | RuleGroup::Update => &[RuleGroup::Basic],
            RuleGroup::Basic => &[],
        }
    }
}

/// Expand a requested group set to its transitive closure.
pub(crate) fn effective_groups(requested: &[RuleGroup]) -> Vec<RuleGroup> {
    let mut effective: Vec<RuleGroup> = Vec::with_capacity(requested.len() + 1);
    let mut pending: Vec<RuleGroup> = requested.to_vec();

    while let Some(group) = pending.pop() {
        if effective.contains(&group) {
            continue;
        }
        effective.push(group);
        pending.extend_from_slice(group.implies());
    }

    effective
}
