//! In-memory record store - used when no database is configured, and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bloglist_core::domain::Blog;
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BaseRepository, BlogRepository};

/// Blog repository keeping records in insertion order behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryBlogRepository {
    store: RwLock<Vec<Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::with_blogs(Vec::new())
    }

    /// Start with a pre-populated store.
    pub fn with_blogs(blogs: Vec<Blog>) -> Self {
        Self {
            store: RwLock::new(blogs),
        }
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Blog, Uuid> for InMemoryBlogRepository {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        Ok(self.store.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;

        if store.iter().any(|b| b.id == blog.id) {
            return Err(RepoError::Constraint(format!("blog {} already exists", blog.id)));
        }

        tracing::debug!(blog_id = %blog.id, "Inserting blog");
        store.push(blog.clone());
        Ok(blog)
    }

    async fn update(&self, blog: Blog) -> Result<Option<Blog>, RepoError> {
        let mut store = self.store.write().await;

        let Some(slot) = store.iter_mut().find(|b| b.id == blog.id) else {
            return Ok(None);
        };
        *slot = blog.clone();
        Ok(Some(blog))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|b| b.id != id);
        Ok(store.len() < before)
    }
}

impl BlogRepository for InMemoryBlogRepository {}
