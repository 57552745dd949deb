//! Post search.

use crate::domain::records::Post;

/// Filter posts whose title or body contains `query`, ignoring case.
///
/// An empty query returns every post. Order is kept.
///
/// # Examples
///
/// ```
/// use dashboard::domain::search::search_posts;
/// use dashboard::domain::{Post, PostId, UserId};
///
/// let posts = vec![Post {
///     id: PostId::new(1),
///     user_id: UserId::new(1),
///     title: "Rust tips".to_owned(),
///     body: String::new(),
/// }];
/// assert_eq!(search_posts(&posts, "RUST").len(), 1);
/// assert!(search_posts(&posts, "zzz-no-match").is_empty());
/// ```
#[must_use]
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle) || post.body.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::records::{PostId, UserId};

    #[fixture]
    fn posts() -> Vec<Post> {
        [
            (1, "Morning walk", "Sunny and calm"),
            (2, "Evening", "A WALK by the river"),
            (3, "Recipes", "Bread and soup"),
        ]
        .into_iter()
        .map(|(id, title, body)| Post {
            id: PostId::new(id),
            user_id: UserId::new(1),
            title: title.to_owned(),
            body: body.to_owned(),
        })
        .collect()
    }

    fn ids(found: &[&Post]) -> Vec<u64> {
        found.iter().map(|post| post.id.get()).collect()
    }

    #[rstest]
    #[case::empty("", vec![1, 2, 3])]
    #[case::space_is_literal(" and ", vec![1, 3])]
    #[case::title_and_body("walk", vec![1, 2])]
    #[case::upper_case_query("BREAD", vec![3])]
    #[case::body_only("river", vec![2])]
    #[case::no_match("zzz-no-match", vec![])]
    fn filters_by_title_or_body(
        posts: Vec<Post>,
        #[case] query: &str,
        #[case] expected: Vec<u64>,
    ) {
        assert_eq!(ids(&search_posts(&posts, query)), expected);
    }
}
