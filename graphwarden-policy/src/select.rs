//! Role-based rule selection

use crate::types::{Rule, RuleSet};

impl RuleSet {
    /// Keep the rules applicable to `role`: wildcard rules plus rules whose
    /// role equals the requested one by exact, case-sensitive match.
    ///
    /// Order-preserving relative to the declaration order. There is no role
    /// hierarchy or inheritance; a caller without a role matches wildcard
    /// rules only.
    pub fn select(&self, role: Option<&str>) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|rule| match rule.role() {
                None => true,
                Some(r) => Some(r) == role,
            })
            .collect()
    }
}
