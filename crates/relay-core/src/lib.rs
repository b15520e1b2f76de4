//! Core library for Relay
//!
//! Relay forwards file-lock status queries and updates from coding agents to
//! an external coordination service. All lock state, conflict detection and
//! orchestration decisions live in that service; this crate only:
//!
//! - models the request and response shapes ([`model`], [`request`])
//! - resolves the caller identity from a username ([`auth`])
//! - talks to the service over HTTP ([`client`])
//! - maps transport failures to fixed fallback responses ([`service`])
//!
//! ```text
//! [ tool arguments ]
//!        |
//!        v
//! [ RelayService ] --validate--> [ CheckStatusRequest / PostStatusRequest ]
//!        |
//!        v
//! [ CoordinationApi ] --POST /api/...--> [ coordination service ]
//!        |
//!        v
//! [ CheckStatusResponse / PostStatusResponse ]  (or an offline/conflict fallback)
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod request;
pub mod service;

pub use auth::AuthenticatedUser;
pub use client::{CoordinationApi, HttpCoordinationClient};
pub use config::RelayConfig;
pub use error::{Error, Result};
pub use model::{
    CheckStatusResponse, LockEntry, LockStatus, LockType, OrchestrationAction,
    OrchestrationCommand, PostStatusResponse, RepoStatus,
};
pub use request::{CheckStatusRequest, LockIntent, PostStatusRequest};
pub use service::RelayService;
