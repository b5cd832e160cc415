//! # Warden SDK for Rust
//!
//! Rust client for the Warden security administration API. This crate covers
//! role management: listing, fetching, saving, deleting, and bulk-updating
//! roles, with the same payload normalization the Warden console applies
//! before persisting a role.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warden_sdk::{Config, RolesClient, SaveRoleParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("https://warden.example.com")
//!         .with_api_key("my-api-key");
//!
//!     let client = RolesClient::new(config)?;
//!
//!     let roles = client.list_roles().await?;
//!     println!("Found {} roles", roles.len());
//!
//!     let mut role = client.get_role("viewer").await?;
//!     role.elasticsearch.cluster.push("monitor".into());
//!     client.save_role(&SaveRoleParams::new(role)).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! The client is stateless between calls and performs exactly one HTTP
//! exchange per operation — no retries, no caching. Retry and cancellation
//! policy belong to the caller; the server is the sole source of truth.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;

// Re-export main types
pub use client::{RolesClient, SaveRoleParams};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{
    BulkUpdateError, BulkUpdateRolesResponse, ElasticsearchPrivileges, IndexPrivilege,
    KibanaPrivilege, RemoteIndexPrivilege, Role, RolePayload,
};
pub use transport::{HttpTransport, Transport};
