use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Blog entity - a single entry in the bloglist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u32,
}

/// The writable fields of a blog, already checked for presence.
///
/// Used both for creating a blog and for replacing every field of an
/// existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u32,
}

impl BlogDraft {
    /// Build a draft from raw request fields.
    ///
    /// `title` and `url` must be present and non-empty; `likes` falls back to 0.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<u32>,
    ) -> Result<Self, DomainError> {
        let title = required("title", title)?;
        let url = required("url", url)?;

        Ok(Self {
            title,
            author,
            url,
            likes: likes.unwrap_or(0),
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::Validation(format!("`{field}` is required"))),
    }
}

impl Blog {
    /// Create a new blog with a freshly generated id.
    pub fn new(draft: BlogDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// A blog carrying `id` with every other field taken from `draft`.
    pub fn with_id(id: Uuid, draft: BlogDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            url: draft.url,
            likes: draft.likes,
        }
    }
}

/// Parse a blog identifier taken from a request path.
pub fn parse_blog_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::Validation(format!("malformed id `{raw}`")))
}
