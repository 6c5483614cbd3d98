//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Application state and test server builders
//! - Session token helpers
//! - Database fixtures (skipped when `DATABASE_URL` is unset)
//! - Custom assertion macros

#[cfg(feature = "ssr")]
pub mod auth_helpers;
#[cfg(feature = "ssr")]
pub mod database;
#[cfg(feature = "ssr")]
pub mod server;

#[cfg(feature = "ssr")]
pub use auth_helpers::*;
#[cfg(feature = "ssr")]
pub use database::*;
#[cfg(feature = "ssr")]
pub use server::*;
