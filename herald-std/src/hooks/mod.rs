//! Standard hook implementations.

pub mod filter;
pub mod logging;

pub use filter::FilterHook;
pub use logging::LoggingHook;
