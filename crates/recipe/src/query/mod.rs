use std::ops::Deref;

mod catalog;
mod recipe;

pub use catalog::*;
pub use recipe::*;

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
