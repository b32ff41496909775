//! Phase 2: Override Resolution
//!
//! Two rule sets collide when their base ids (file stem without the numeric
//! prefix) are equal, whatever layer they come from. The one discovered last
//! wins, since discovery lists layers from generic to specific. Survivors
//! keep their discovery order.

use std::collections::HashSet;

use super::RuleSetDescriptor;

/// A rule set dropped in favour of a later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overridden {
    pub descriptor: RuleSetDescriptor,
    /// `long_id` of the rule set that replaced it.
    pub by: String,
}

/// Execute Phase 2: keep only the last rule set of each base id.
pub fn resolve_overrides(descriptors: Vec<RuleSetDescriptor>) -> Vec<RuleSetDescriptor> {
    partition_overrides(descriptors).0
}

/// Split descriptors into survivors and the rule sets they override.
///
/// Scans from the end; an element whose base id was already seen later in
/// the list is overridden by that later element.
pub fn partition_overrides(
    descriptors: Vec<RuleSetDescriptor>,
) -> (Vec<RuleSetDescriptor>, Vec<Overridden>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(descriptors.len());
    let mut overridden = Vec::new();

    for descriptor in descriptors.into_iter().rev() {
        if seen.insert(descriptor.base_id.clone()) {
            kept.push(descriptor);
            continue;
        }
        let by = kept
            .iter()
            .find(|k: &&RuleSetDescriptor| k.base_id == descriptor.base_id)
            .map(|k| k.long_id.clone())
            .unwrap_or_default();
        overridden.push(Overridden { descriptor, by });
    }

    kept.reverse();
    overridden.reverse();
    (kept, overridden)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(paths: &[&str]) -> Vec<RuleSetDescriptor> {
        paths.iter().map(|p| RuleSetDescriptor::from_path(p)).collect()
    }

    fn paths(descriptors: &[RuleSetDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn test_later_rule_set_wins() {
        let resolved = resolve_overrides(descriptors(&[
            "100-directory/30-readme",
            "200-version-control/10-project-name",
            "500-name/acme/widget/30-readme",
        ]));
        assert_eq!(
            paths(&resolved),
            vec!["200-version-control/10-project-name", "500-name/acme/widget/30-readme"]
        );
    }

    #[test]
    fn test_prefix_number_does_not_matter() {
        let resolved = resolve_overrides(descriptors(&[
            "200-version-control/12-git-remote-url",
            "300-remote-url/11-git-remote-url",
        ]));
        assert_eq!(paths(&resolved), vec!["300-remote-url/11-git-remote-url"]);
    }

    #[test]
    fn test_survivors_keep_relative_order() {
        let resolved = resolve_overrides(descriptors(&[
            "g1/10-a",
            "g1/20-b",
            "g1/30-c",
            "g2/10-b",
            "g2/20-d",
        ]));
        assert_eq!(paths(&resolved), vec!["g1/10-a", "g1/30-c", "g2/10-b", "g2/20-d"]);
    }

    #[test]
    fn test_three_way_collision_keeps_last() {
        let (kept, overridden) =
            partition_overrides(descriptors(&["a/10-x", "b/10-x", "c/10-x"]));
        assert_eq!(paths(&kept), vec!["c/10-x"]);
        assert_eq!(overridden.len(), 2);
        assert!(overridden.iter().all(|o| o.by == "c/10-x"));
        assert_eq!(overridden[0].descriptor.path, "a/10-x");
    }

    #[test]
    fn test_no_collisions_is_identity() {
        let input = descriptors(&["a/10-x", "a/20-y", "b/10-z"]);
        assert_eq!(resolve_overrides(input.clone()), input);
    }
}
