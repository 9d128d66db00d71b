//! Application layer: the pure economy engine and the service that wires it
//! to a pet store and a notifier for each incoming request.

pub mod engine;
pub mod service;
