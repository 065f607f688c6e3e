//! PostgreSQL repository implementations.

use bloglist_core::ports::BlogRepository;

use super::entity::blog::Entity as BlogEntity;
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL blog repository.
pub type PostgresBlogRepository = PostgresBaseRepository<BlogEntity>;

impl BlogRepository for PostgresBlogRepository {}
