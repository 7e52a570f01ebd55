pub mod config;
pub mod event;
pub mod layout;
pub mod state;

// Re-export everything for convenience
pub use config::*;
pub use event::*;
pub use layout::*;
pub use state::*;
