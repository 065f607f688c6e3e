//! Aggregations over an in-memory list of blogs.
//!
//! Every helper is pure and reads its input in order. Where two candidates
//! tie, the one seen first wins. Blogs without an author count towards
//! [`total_likes`] and [`favorite_blog`] but are never credited to an author.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::Blog;

/// The author with the most blogs, and how many they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

/// The author whose blogs collected the most likes, and the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// Sum of likes across all blogs.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().map(|b| u64::from(b.likes)).sum()
}

/// The blog with the most likes.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().fold(None, |best: Option<&Blog>, blog| match best {
        Some(b) if b.likes >= blog.likes => Some(b),
        _ => Some(blog),
    })
}

/// The author who wrote the most blogs.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    top_author(blogs, |_| 1).map(|(author, blogs)| AuthorBlogs {
        author: author.to_string(),
        blogs: blogs as usize,
    })
}

/// The author with the largest sum of likes.
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    top_author(blogs, |b| u64::from(b.likes)).map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// Group blogs by author, summing `weight` per group, and pick the heaviest
/// group. Groups keep the order in which their author first appeared.
fn top_author<'a>(blogs: &'a [Blog], weight: impl Fn(&Blog) -> u64) -> Option<(&'a str, u64)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, u64)> = Vec::new();

    for blog in blogs {
        let Some(author) = blog.author.as_deref() else {
            continue;
        };
        let slot = *slots.entry(author).or_insert_with(|| {
            groups.push((author, 0));
            groups.len() - 1
        });
        groups[slot].1 += weight(blog);
    }

    groups
        .into_iter()
        .fold(None, |best: Option<(&str, u64)>, group| match best {
            Some(b) if b.1 >= group.1 => Some(b),
            _ => Some(group),
        })
}

/// Every aggregation at once, as served by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_blog: Option<Blog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    pub fn from_blogs(blogs: &[Blog]) -> Self {
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs).cloned(),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}
