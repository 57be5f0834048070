//! These models represent the objects passed between the agent and its providers
//!
//! Providers translate them into their own wire formats at the edge, so nothing vendor
//! specific leaks into these types.
pub mod message;
pub mod role;
