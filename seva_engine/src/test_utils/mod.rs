//! Helpers for tests that need a real database. Not meant for production use.
#[cfg(feature = "sqlite")]
pub mod prepare_env;
