//! Graph construction and representation
//!
//! This module provides id-keyed graph building and compact storage
//! for the directed link graph.

pub mod builder;
pub mod csr;
