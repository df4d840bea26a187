mod query;
pub(crate) mod repository;
mod root;
pub mod subscription;
pub mod token;

pub use query::*;
pub use root::*;
