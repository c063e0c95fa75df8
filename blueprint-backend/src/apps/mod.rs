//! External app registrations and their sync state.

pub mod registry;

pub use registry::AppRegistry;
