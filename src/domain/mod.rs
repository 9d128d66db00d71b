//! Domain model: pets, the shop, user actions and the ports the application
//! layer talks to.

pub mod action;
pub mod pet;
pub mod ports;
pub mod rules;
pub mod shop;
