//! Command handlers, one module per command family.

pub mod archive;
pub mod crypt;
pub mod misc;
