//! Authentication Handlers Module
//!
//! HTTP handlers for account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Request and response types
//! ├── validation.rs - Username and password rules
//! ├── signup.rs     - Parent registration
//! ├── login.rs      - Parent and child login
//! ├── children.rs   - Child creation and listing
//! └── me.rs         - Current session
//! ```
//!
//! # Handlers
//!
//! - **`parent_signup`** - POST /api/parents/signup
//! - **`parent_login`** - POST /api/parents/login
//! - **`child_login`** - POST /api/children/login
//! - **`create_child_account`** - POST /api/children (parent token)
//! - **`list_child_accounts`** - GET /api/children (parent token)
//! - **`get_me`** - GET /api/me (any token)

/// Request and response types
pub mod types;

/// Input validation
pub mod validation;

/// Signup handler
pub mod signup;

/// Login handlers
pub mod login;

/// Child account handlers
pub mod children;

/// Get current account handler
pub mod me;

pub use types::{AccountResponse, AuthResponse, CreateChildRequest, LoginRequest, MeResponse, ParentSignupRequest};

pub use children::{create_child_account, list_child_accounts};
pub use login::{child_login, parent_login};
pub use me::get_me;
pub use signup::parent_signup;
