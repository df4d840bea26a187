mod data;
mod migrate;
mod server;
mod user;

pub use data::{create_tag, load_ingredients};
pub use migrate::{migrate, reset};
pub use server::serve;
pub use user::make_staff;
