//! Input formats that produce link graphs.

pub mod json;
