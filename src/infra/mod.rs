//! Slug derivation, password hashing, markdown rendering

mod markdown;
mod password;
mod slug;

pub use markdown::markdown_to_html;
pub use password::{PasswordError, PasswordHasher};
pub use slug::slugify;
