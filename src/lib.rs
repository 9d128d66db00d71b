//! Pet economy engine for a social-frame virtual pet.
//!
//! Incoming actions (`feed`, `play`, `buy`) are turned into new pet snapshots
//! by [`application::engine::EconomyEngine`], a pure function with no I/O.
//! [`application::service::PetService`] wires it to a [`domain::ports::PetStore`]
//! and a [`domain::ports::Notifier`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
