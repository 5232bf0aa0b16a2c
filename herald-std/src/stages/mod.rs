//! The two handler stages around the recording step.
//!
//! Both stages snapshot their registration list before calling into user
//! code, so callbacks may register or emit reentrantly without deadlocking.

pub mod subscription;
pub mod transform;

pub use subscription::SubscriptionStage;
pub use transform::TransformStage;
