//! Boundary adapters: CSV request streams and frame responses.

pub mod csv;
pub mod frame;
