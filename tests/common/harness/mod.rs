//! Test harness for HTTP and CLI integration tests.
//!
//! Provides an in-process application with a cookie-keeping client,
//! isolated temp environments, and CLI assertion helpers using `assert_cmd`.

mod app;
mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use app::{TestApp, TestClient, TestResponse};
#[allow(unused_imports)]
pub use command::NotesCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
