// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Parent kinds to try, by instance label, for objects without usable owner references

use crate::types::Gvk;

type StaticGvk = (&'static str, &'static str, &'static str);

const POD_PARENTS: &[StaticGvk] = &[
    ("apps", "v1", "DaemonSet"),
    ("apps", "v1", "Deployment"),
    ("apps", "v1", "ReplicaSet"),
    ("apps", "v1", "StatefulSet"),
    ("apps", "v1beta1", "Deployment"),
    ("apps", "v1beta1", "StatefulSet"),
];

const REPLICA_SET_PARENTS: &[StaticGvk] = &[
    ("apps", "v1", "Deployment"),
    ("apps", "v1beta1", "Deployment"),
    ("apps", "v1beta1", "StatefulSet"),
];

const ENDPOINTS_PARENTS: &[StaticGvk] = &[("", "v1", "Service")];

/// Candidate parent kinds for `child`, in the order they are tried
pub fn candidate_parents(child: &Gvk) -> Vec<Gvk> {
    let table = match (child.group.as_str(), child.version.as_str(), child.kind.as_str()) {
        ("", "v1", "Pod") => POD_PARENTS,
        ("apps", "v1", "ReplicaSet") => REPLICA_SET_PARENTS,
        ("", "v1", "Endpoints") => ENDPOINTS_PARENTS,
        _ => &[],
    };

    table
        .iter()
        .map(|(group, version, kind)| Gvk::new(group, version, kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_candidates_start_with_daemon_set() {
        let candidates = candidate_parents(&Gvk::new("", "v1", "Pod"));

        assert_eq!(candidates.len(), 6);
        assert_eq!(candidates[0], Gvk::new("apps", "v1", "DaemonSet"));
        assert!(candidates.contains(&Gvk::new("apps", "v1", "Deployment")));
    }

    #[test]
    fn test_endpoints_fall_back_to_service() {
        assert_eq!(
            candidate_parents(&Gvk::new("", "v1", "Endpoints")),
            vec![Gvk::new("", "v1", "Service")]
        );
    }

    #[test]
    fn test_other_kinds_have_no_candidates() {
        assert!(candidate_parents(&Gvk::new("", "v1", "ConfigMap")).is_empty());
        assert!(candidate_parents(&Gvk::new("apps", "v1beta1", "ReplicaSet")).is_empty());
    }
}
