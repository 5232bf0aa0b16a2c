//! # herald-std
//!
//! Standard components for the Herald in-process event bus.
//!
//! This crate provides:
//! - **History**: [`HistoryStore`], the append-only record of delivered events
//! - **Stages**: [`TransformStage`] (before) and [`SubscriptionStage`] (on)
//! - **Configuration**: [`Config`] with deep-merge semantics
//! - **Standard hooks**: Logging, Filter
//! - **Testing**: recording and counting test doubles

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use herald_core;

// Modules
pub mod config;
pub mod history;
pub mod hooks;
pub mod stages;
pub mod testing;

pub use config::{Config, Settings};
pub use history::HistoryStore;
pub use stages::{SubscriptionStage, TransformStage};
