//! Supporting utilities used by models.

pub mod constraint;
pub mod ode;
pub mod plot;
pub mod units;
