use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, BlogDraft};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Fetch every stored entity.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. `None` when nothing is stored under its ID.
    async fn update(&self, entity: T) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID, reporting whether anything was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Blog repository.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, Uuid> {
    /// Store a new blog under a freshly assigned id.
    async fn create(&self, draft: BlogDraft) -> Result<Blog, RepoError> {
        self.insert(Blog::new(draft)).await
    }

    /// Replace every field of the blog stored under `id`.
    async fn replace(&self, id: Uuid, draft: BlogDraft) -> Result<Option<Blog>, RepoError> {
        self.update(Blog::with_id(id, draft)).await
    }
}
