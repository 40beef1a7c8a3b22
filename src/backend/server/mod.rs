//! Server Module
//!
//! Server initialization and the shared application state.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - App creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the log hub, the demo generator and the shutdown token.
//! The hub is created once by the binary (or a test) and injected here; it is
//! never a global.

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
