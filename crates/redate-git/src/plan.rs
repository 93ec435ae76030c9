// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Selection and anchor resolution
//!
//! Given the fetched history window and the operator's chosen subset,
//! this module determines the rebase anchor and the ordered list of
//! commits the rewrite session must step through.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commit::CommitRecord;
use crate::error::GitError;

/// The computed rewrite: an immutable base plus the ordered commits the
/// session visits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewritePlan {
    /// The last untouched ancestor; the rebase session's base. May be a
    /// merge commit (merges are valid boundaries, never rewrite targets).
    pub anchor: CommitRecord,
    /// Commits the session steps through, oldest first. Contains every
    /// non-merge commit after the anchor up to the newest commit in the
    /// window, selected or not; never contains a merge.
    pub visit_list: Vec<CommitRecord>,
}

impl RewritePlan {
    /// Number of operator-selected commits in the visit list
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.visit_list.iter().filter(|c| c.selected).count()
    }
}

/// Resolve the operator's selection into a rewrite plan
///
/// `commits` is the fetched window, newest first; `selected_hashes`
/// holds the full hashes the operator chose. Matching records are marked
/// `selected`. The anchor is the commit immediately preceding the
/// earliest selected one; when that predecessor is a merge, the merge
/// itself becomes the boundary (the scan never steps past it, since
/// merges cannot be replayed). The visit list is every non-merge commit
/// strictly after the anchor through the newest commit in the window.
///
/// # Errors
///
/// Returns `GitError::NoUsableAncestor` when the earliest selected
/// commit is the oldest fetched commit, or when nothing was selected (an
/// empty selection has no earliest commit to anchor).
pub fn resolve(
    commits: &[CommitRecord],
    selected_hashes: &[String],
) -> Result<RewritePlan, GitError> {
    let mut oldest_first: Vec<CommitRecord> = commits.iter().rev().cloned().collect();
    for commit in &mut oldest_first {
        if selected_hashes.contains(&commit.full_hash) {
            commit.selected = true;
        }
    }

    let Some(first_selected) = oldest_first.iter().position(|c| c.selected) else {
        return Err(GitError::NoUsableAncestor);
    };
    if first_selected == 0 {
        return Err(GitError::NoUsableAncestor);
    }

    let anchor = oldest_first[first_selected - 1].clone();
    let visit_list: Vec<CommitRecord> = oldest_first[first_selected..]
        .iter()
        .filter(|c| !c.is_merge())
        .cloned()
        .collect();

    debug!(
        anchor = %anchor.short_hash,
        visits = visit_list.len(),
        selected = visit_list.iter().filter(|c| c.selected).count(),
        "resolved rewrite plan"
    );

    Ok(RewritePlan { anchor, visit_list })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Signature;
    use chrono::{FixedOffset, TimeZone};
    use similar_asserts::assert_eq;

    /// Build a window of `n` commits, newest first, each hash being its
    /// subject letter repeated. `merges` lists sequence indices that get
    /// two parents.
    fn window(n: usize, merges: &[usize]) -> Vec<CommitRecord> {
        let offset = FixedOffset::east_opt(0).unwrap();
        (0..n)
            .map(|index| {
                let seed = char::from(b'a' + index as u8);
                let full_hash: String = std::iter::repeat(seed).take(40).collect();
                let parents = if merges.contains(&index) {
                    vec!["1".repeat(40), "2".repeat(40)]
                } else {
                    vec!["0".repeat(40)]
                };
                let signature = Signature {
                    name: "Test".to_string(),
                    email: "test@example.com".to_string(),
                    date: offset
                        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
                        .unwrap()
                        - chrono::Duration::hours(index as i64),
                };
                CommitRecord {
                    short_hash: full_hash[..7].to_string(),
                    full_hash,
                    parent_hashes: parents,
                    author: signature.clone(),
                    committer: signature,
                    subject: format!("commit {seed}"),
                    body: String::new(),
                    sequence_index: index,
                    selected: false,
                }
            })
            .collect()
    }

    fn hash_of(commits: &[CommitRecord], sequence_index: usize) -> String {
        commits[sequence_index].full_hash.clone()
    }

    #[test]
    fn test_anchor_is_predecessor_of_earliest_selected() {
        let commits = window(5, &[]);
        // Select positions 1 and 3 (0 = newest); earliest selected is 3,
        // so the anchor is position 4 (the oldest fetched commit).
        let selected = vec![hash_of(&commits, 1), hash_of(&commits, 3)];
        let plan = resolve(&commits, &selected).expect("resolve");

        assert_eq!(plan.anchor.sequence_index, 4);
        let visited: Vec<usize> = plan.visit_list.iter().map(|c| c.sequence_index).collect();
        assert_eq!(visited, vec![3, 2, 1, 0]);
        assert_eq!(plan.selected_count(), 2);
    }

    #[test]
    fn test_visit_list_is_oldest_first_and_marks_selection() {
        let commits = window(4, &[]);
        let selected = vec![hash_of(&commits, 2)];
        let plan = resolve(&commits, &selected).expect("resolve");

        assert!(plan.visit_list[0].selected);
        assert!(!plan.visit_list[1].selected);
        assert!(!plan.visit_list[2].selected);
        assert_eq!(plan.visit_list.len(), 3);
    }

    #[test]
    fn test_merge_predecessor_becomes_the_anchor() {
        let commits = window(5, &[3]);
        let selected = vec![hash_of(&commits, 2)];
        let plan = resolve(&commits, &selected).expect("resolve");

        assert!(plan.anchor.is_merge());
        assert_eq!(plan.anchor.sequence_index, 3);
        assert!(plan.visit_list.iter().all(|c| !c.is_merge()));
    }

    #[test]
    fn test_merges_inside_range_are_never_visited() {
        let commits = window(6, &[2]);
        let selected = vec![hash_of(&commits, 4)];
        let plan = resolve(&commits, &selected).expect("resolve");

        let visited: Vec<usize> = plan.visit_list.iter().map(|c| c.sequence_index).collect();
        assert_eq!(visited, vec![4, 3, 1, 0]);
    }

    #[test]
    fn test_oldest_commit_selected_has_no_ancestor() {
        let commits = window(3, &[]);
        let selected = vec![hash_of(&commits, 2)];
        let err = resolve(&commits, &selected).expect_err("should fail");
        assert!(matches!(err, GitError::NoUsableAncestor));
    }

    #[test]
    fn test_empty_selection_has_no_ancestor() {
        let commits = window(3, &[]);
        let err = resolve(&commits, &[]).expect_err("should fail");
        assert!(matches!(err, GitError::NoUsableAncestor));
    }

    #[test]
    fn test_selection_does_not_mutate_input() {
        let commits = window(3, &[]);
        let selected = vec![hash_of(&commits, 1)];
        let _ = resolve(&commits, &selected).expect("resolve");
        assert!(commits.iter().all(|c| !c.selected));
    }

    #[test]
    fn test_plan_serialization_roundtrip() {
        let commits = window(4, &[]);
        let selected = vec![hash_of(&commits, 1)];
        let plan = resolve(&commits, &selected).expect("resolve");

        let json = serde_json::to_string(&plan).expect("serialize");
        let deserialized: RewritePlan = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(plan, deserialized);
    }
}
