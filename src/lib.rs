//! # Twine Zone
//!
//! Two-node RC thermal models of a building zone for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A zone is lumped into an interior air node and a structural (wall) node.
//! Their temperatures evolve under a pair of coupled first-order ODEs driven
//! by the exterior temperature and by interior and solar heat gains.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
