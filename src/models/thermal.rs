//! Thermal systems models.
//!
//! This module contains lumped-parameter models of building thermal
//! behavior.

pub mod zone;
