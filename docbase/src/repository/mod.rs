//! The typed repository facade.

mod builder;
mod cursor;
mod default_repository;
#[allow(clippy::module_inception)]
mod repository;

pub use builder::RepositoryBuilder;
pub use cursor::EntityCursor;
pub use default_repository::DefaultRepository;
pub use repository::{Repository, RepositoryProvider};
