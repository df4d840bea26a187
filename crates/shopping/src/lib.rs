mod aggregation;
mod cart;
mod query;

pub use aggregation::*;
pub use cart::Command;
pub use query::*;
