//! GPS proximity alarm server.
//!
//! Resolves a source and destination by name, then tells a traveler
//! whose device reports its position when they come within a chosen
//! distance of the destination.

pub mod config;
pub mod domain;
pub mod error;
pub mod geocode;
pub mod route;
pub mod session;
pub mod web;
