//! Merge engine combining remote collections with local-only records.
//!
//! Runs once per committed load. The default policy deduplicates by id with
//! the local copy winning; the legacy policy concatenates and may therefore
//! hold two records with the same id.

use std::collections::HashMap;

use crate::domain::ports::{LocalRecords, RemoteSnapshot};
use crate::domain::records::{Comment, Post, Record, User};

/// How remote and local copies of the same id are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Local copies replace remote copies in place; unmatched local records
    /// are appended in local order.
    #[default]
    LocalWins,
    /// Remote records followed by local records, with no deduplication.
    Concatenate,
}

/// Working collections produced by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    /// Working users.
    pub users: Vec<User>,
    /// Working posts.
    pub posts: Vec<Post>,
    /// Working comments.
    pub comments: Vec<Comment>,
}

/// Merge one collection.
///
/// # Examples
///
/// ```
/// use dashboard::domain::merge::{MergePolicy, merge_records};
/// use dashboard::domain::{Post, PostId, UserId};
///
/// let post = |id, title: &str| Post {
///     id: PostId::new(id),
///     user_id: UserId::new(1),
///     title: title.to_owned(),
///     body: String::new(),
/// };
/// let merged = merge_records(
///     vec![post(1, "remote"), post(2, "other")],
///     &[post(1, "edited"), post(9, "new")],
///     MergePolicy::LocalWins,
/// );
/// let titles: Vec<_> = merged.iter().map(|p| p.title.as_str()).collect();
/// assert_eq!(titles, ["edited", "other", "new"]);
/// ```
#[must_use]
pub fn merge_records<R: Record>(remote: Vec<R>, local: &[R], policy: MergePolicy) -> Vec<R> {
    match policy {
        MergePolicy::Concatenate => {
            let mut merged = remote;
            merged.extend_from_slice(local);
            merged
        }
        MergePolicy::LocalWins => {
            let mut overrides: HashMap<R::Id, &R> = HashMap::with_capacity(local.len());
            for record in local {
                overrides.entry(record.id()).or_insert(record);
            }
            let mut merged = Vec::with_capacity(remote.len() + local.len());
            for record in remote {
                match overrides.remove(&record.id()) {
                    Some(edited) => merged.push(edited.clone()),
                    None => merged.push(record),
                }
            }
            merged.extend(
                local
                    .iter()
                    .filter(|record| overrides.remove(&record.id()).is_some())
                    .cloned(),
            );
            merged
        }
    }
}

/// Merge every collection.
#[must_use]
pub fn merge(remote: RemoteSnapshot, local: &LocalRecords, policy: MergePolicy) -> WorkingSet {
    WorkingSet {
        users: merge_records(remote.users, &local.users, policy),
        posts: merge_records(remote.posts, &local.posts, policy),
        comments: merge_records(remote.comments, &local.comments, policy),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::records::{CommentId, PostId, UserId};

    fn post(id: u64, title: &str) -> Post {
        Post {
            id: PostId::new(id),
            user_id: UserId::new(1),
            title: title.to_owned(),
            body: "body".to_owned(),
        }
    }

    fn comment(id: u64, post_id: u64) -> Comment {
        Comment {
            id: CommentId::new(id),
            post_id: PostId::new(post_id),
            name: "n".to_owned(),
            email: "e@x.io".to_owned(),
            body: "b".to_owned(),
        }
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[rstest]
    #[case::local_wins(MergePolicy::LocalWins)]
    #[case::concatenate(MergePolicy::Concatenate)]
    fn remote_only_passes_through(#[case] policy: MergePolicy) {
        let merged = merge_records(vec![post(1, "a")], &[], policy);
        assert_eq!(merged, vec![post(1, "a")]);
    }

    #[rstest]
    #[case::local_wins(MergePolicy::LocalWins)]
    #[case::concatenate(MergePolicy::Concatenate)]
    fn local_only_passes_through(#[case] policy: MergePolicy) {
        let merged = merge_records(Vec::new(), &[post(5, "e")], policy);
        assert_eq!(merged, vec![post(5, "e")]);
    }

    #[test]
    fn concatenate_keeps_both_copies_of_an_edited_record() {
        let merged = merge_records(
            vec![post(1, "stale"), post(2, "b")],
            &[post(1, "edited")],
            MergePolicy::Concatenate,
        );
        assert_eq!(titles(&merged), ["stale", "b", "edited"]);
    }

    #[test]
    fn local_wins_replaces_in_place_and_appends_the_rest() {
        let merged = merge_records(
            vec![post(1, "stale"), post(2, "b"), post(3, "c")],
            &[post(7, "new"), post(2, "edited")],
            MergePolicy::LocalWins,
        );
        assert_eq!(titles(&merged), ["stale", "edited", "c", "new"]);
    }

    #[test]
    fn local_wins_uses_first_local_copy_of_duplicate_ids() {
        let merged = merge_records(
            vec![post(1, "stale")],
            &[post(1, "first"), post(1, "second"), post(4, "x"), post(4, "y")],
            MergePolicy::LocalWins,
        );
        assert_eq!(titles(&merged), ["first", "x"]);
    }

    #[test]
    fn merge_combines_every_collection() {
        let remote = RemoteSnapshot {
            users: Vec::new(),
            posts: vec![post(1, "a")],
            comments: vec![comment(10, 1)],
        };
        let local = LocalRecords {
            comments: vec![comment(11, 1)],
            ..LocalRecords::default()
        };

        let working = merge(remote, &local, MergePolicy::LocalWins);

        assert!(working.users.is_empty());
        assert_eq!(working.posts.len(), 1);
        assert_eq!(
            working.comments.iter().map(|c| c.id.get()).collect::<Vec<_>>(),
            [10, 11]
        );
    }
}
