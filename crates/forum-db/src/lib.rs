//! # forum-db
//!
//! Persistence for the forum: PostgreSQL implementations of the
//! `forum-core` ports via SQLx, the embedded schema, and [`MemoryStore`],
//! an in-process store implementing the same ports.
//!
//! ```rust,ignore
//! use forum_db::{create_pool, run_migrations, PgTransactionManager, PoolTimeouts};
//!
//! let pool = create_pool(&config.database, PoolTimeouts::default()).await?;
//! run_migrations(&pool).await?;
//! let transactions = PgTransactionManager::new(pool.clone());
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolTimeouts};
pub use repositories::{
    PgArticleRepository, PgCommentRepository, PgForumTransaction, PgNotificationRepository,
    PgTagRepository, PgTransactionManager, PgUserRepository,
};
