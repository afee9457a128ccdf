//! Hover Common Library
//!
//! Shared types and configuration loading for the vertical manual-control
//! flight task and its tooling.
//!
//! # Module Structure
//!
//! - [`altitude`] - Estimator sample, manual input, setpoint record and tunable parameters
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Default tick period and parameter bounds
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use hover_common::prelude::*;
//! ```

pub mod altitude;
pub mod config;
pub mod consts;
pub mod prelude;
