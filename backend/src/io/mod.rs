//! # IO Module
//!
//! Interface layer that exposes the domain services to the outside world.
//! Currently a single REST surface.

pub mod rest;

pub use rest::*;
