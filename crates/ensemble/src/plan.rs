//! Membership diffing between two ensemble configurations.

use std::collections::HashSet;

use crate::config::EnsembleConfig;

/// Joining and leaving member descriptors for one membership change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconfigurationPlan {
    joining: Vec<String>,
    leaving: Vec<String>,
}

impl ReconfigurationPlan {
    /// Computes the plan taking `current` to `target`.
    ///
    /// Joining always carries the complete target membership, in target
    /// order; the admin protocol treats already-present members as no-ops.
    /// Leaving is every current descriptor absent from the target by exact
    /// string equality, in current member order. A port change for an id
    /// therefore produces one leaving and one joining entry for that id.
    #[must_use]
    pub fn between(current: &EnsembleConfig, target: &EnsembleConfig) -> Self {
        let joining = target.descriptors();
        let staying: HashSet<&str> = joining.iter().map(String::as_str).collect();
        let leaving = current
            .descriptors()
            .into_iter()
            .filter(|descriptor| !staying.contains(descriptor.as_str()))
            .collect();

        Self { joining, leaving }
    }

    /// Joining descriptors, in target member order.
    #[must_use]
    pub fn joining(&self) -> &[String] {
        &self.joining
    }

    /// Leaving descriptors, in current member order.
    #[must_use]
    pub fn leaving(&self) -> &[String] {
        &self.leaving
    }

    /// Comma-joined joining list; empty string when nothing joins.
    #[must_use]
    pub fn joining_csv(&self) -> String {
        self.joining.join(",")
    }

    /// Comma-joined leaving list; empty string when nothing leaves.
    #[must_use]
    pub fn leaving_csv(&self) -> String {
        self.leaving.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnsembleMember;

    fn member(id: u32, hostname: &str) -> EnsembleMember {
        EnsembleMember {
            id,
            hostname: hostname.to_string(),
            quorum_port: 2182,
            election_port: 2183,
            client_port: 2181,
        }
    }

    fn config(members: Vec<EnsembleMember>) -> EnsembleConfig {
        EnsembleConfig {
            members,
            dynamic_reconfiguration: true,
        }
    }

    #[test]
    fn joining_is_full_target_membership() {
        let current = config(vec![member(1, "a"), member(2, "b"), member(3, "c")]);
        let target = config(vec![member(2, "b"), member(3, "c"), member(4, "d")]);

        let plan = ReconfigurationPlan::between(&current, &target);
        assert_eq!(
            plan.joining(),
            ["2=b:2182:2183", "3=c:2182:2183", "4=d:2182:2183"]
        );
        assert_eq!(plan.leaving(), ["1=a:2182:2183"]);
    }

    #[test]
    fn identical_configs_leave_nobody() {
        let current = config(vec![member(1, "a"), member(2, "b")]);
        let plan = ReconfigurationPlan::between(&current, &current.clone());
        assert!(plan.leaving().is_empty());
        assert_eq!(plan.joining(), ["1=a:2182:2183", "2=b:2182:2183"]);
    }

    #[test]
    fn port_change_is_leave_plus_join_for_same_id() {
        let current = config(vec![member(1, "a")]);
        let mut changed = member(1, "a");
        changed.quorum_port = 2282;
        let target = config(vec![changed]);

        let plan = ReconfigurationPlan::between(&current, &target);
        assert_eq!(plan.leaving(), ["1=a:2182:2183"]);
        assert_eq!(plan.joining(), ["1=a:2282:2183"]);
    }

    #[test]
    fn csv_forms_are_empty_strings_for_empty_lists() {
        let current = config(vec![member(1, "a")]);
        let target = config(vec![]);

        let plan = ReconfigurationPlan::between(&current, &target);
        assert_eq!(plan.joining_csv(), "");
        assert_eq!(plan.leaving_csv(), "1=a:2182:2183");
    }

    #[test]
    fn leaving_preserves_current_member_order() {
        let current = config(vec![member(3, "c"), member(1, "a"), member(2, "b")]);
        let target = config(vec![]);

        let plan = ReconfigurationPlan::between(&current, &target);
        assert_eq!(
            plan.leaving(),
            ["3=c:2182:2183", "1=a:2182:2183", "2=b:2182:2183"]
        );
    }
}
