pub(crate) mod colour;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
