//! Tags and ingredients. Both are read-only over HTTP and managed from the
//! command line.

use std::ops::Deref;

mod import;
mod tag;

pub use import::{IngredientInput, parse_ingredients};
pub use tag::TagInput;

#[derive(Clone)]
pub struct Command(pub foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
