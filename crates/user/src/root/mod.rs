use std::ops::Deref;

mod login;
mod password;
mod register;
mod staff;

pub use login::LoginInput;
pub use password::SetPasswordInput;
pub use register::RegisterInput;

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    pub subscription: crate::subscription::Command,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State) -> Self {
        Self {
            subscription: crate::subscription::Command(state.clone()),
            state,
        }
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
