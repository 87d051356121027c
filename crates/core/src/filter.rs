use crate::domain::{DateBounds, Post};

/// Keeps the posts whose timestamp date equals `selected_date`.
///
/// The comparison is a plain string match on the text before the first `T`;
/// no timezone adjustment is made. `None` or an empty date keeps everything.
pub fn filter_by_date<'a>(posts: &'a [Post], selected_date: Option<&str>) -> Vec<&'a Post> {
    match selected_date {
        None | Some("") => posts.iter().collect(),
        Some(date) => posts.iter().filter(|post| post.date() == date).collect(),
    }
}

/// Smallest and largest date portions across all posts, compared as strings
pub fn date_bounds(posts: &[Post]) -> Option<DateBounds> {
    let min = posts.iter().map(Post::date).min()?;
    let max = posts.iter().map(Post::date).max()?;
    Some(DateBounds {
        min: min.to_string(),
        max: max.to_string(),
    })
}
