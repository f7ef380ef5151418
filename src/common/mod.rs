//! Module with reusable components used elsewhere in the crate
pub mod scalar;
