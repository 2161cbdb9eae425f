pub mod backend;
pub mod delete;
pub mod error;
pub mod file;
pub mod path;
pub mod session;
pub mod uri;

pub type GridResult<T> = std::result::Result<T, error::GridError>;
