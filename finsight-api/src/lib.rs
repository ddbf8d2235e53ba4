pub mod config;
pub mod handlers;
pub mod state;

pub use state::AppState;
