//! Shared test utilities for the relay workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not each
//! re-implement a fake coordination service. It is a dev-dependency only;
//! never published.
//!
//! # Modules
//!
//! - [`payloads`]: canned coordination-service response bodies
//! - [`service`]: [`MockCoordinationService`] and unreachable endpoints
//! - [`config`]: temporary configuration files

pub mod config;
pub mod payloads;
pub mod service;

pub use service::{MockCoordinationService, unreachable_url};
