//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services hold only a shared database handle.

mod account;
mod message;
mod validation;

pub use account::AccountService;
pub use message::MessageService;
pub use validation::{
    MAX_MESSAGE_CHARS, MIN_PASSWORD_CHARS, validate_message_text, validate_registration,
};
