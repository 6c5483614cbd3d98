//! Authentication Module
//!
//! Parent and child accounts, password hashing, JWT sessions, and the HTTP
//! handlers for the account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── accounts.rs     - Parent/child models and database operations
//! ├── password.rs     - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Parent signup/login**: credentials verified → token with `role = parent`,
//!    producer identity = the parent's id
//! 2. **Child creation**: a parent adds a child linked to itself
//! 3. **Child login**: credentials verified → token with `role = child`,
//!    producer identity = the linked parent's id
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens expire after 30 days
//! - Invalid credentials return 401 (no information leakage)

/// Parent and child accounts
pub mod accounts;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use handlers::{child_login, create_child_account, get_me, list_child_accounts, parent_login, parent_signup};
pub use sessions::{Claims, Role};
