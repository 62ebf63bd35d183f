//! Infrastructure layer: the bounded delay clamp and the process-wide bound
//! it reads by default.
pub mod clamp;
