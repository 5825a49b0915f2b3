pub mod walker;

pub use walker::{load_repository, RepositoryWalker};
