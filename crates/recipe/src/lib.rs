pub mod catalog;
pub mod favorite;
mod image;
mod query;
mod root;

pub use image::DataImage;
pub use query::*;
pub use root::*;
