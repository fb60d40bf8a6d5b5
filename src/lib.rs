//! # telesocial
//!
//! A Rust client library for the Telesocial conferencing REST API.
//!
//! The API registers phone-number endpoints ("network ids"), orchestrates
//! multi-party conference calls, and manages server-side audio resources
//! (recording, playback blasts, upload and download). This crate maps each
//! endpoint onto an async method, in two layers:
//!
//! - per-resource API handlers ([`NetworkIdApi`], [`ConferenceApi`],
//!   [`MediaApi`]) with one method per remote operation, returning the raw
//!   [`ApiResponse`] (status code plus JSON body) after the endpoint's
//!   status-code policy has been applied;
//! - item handles ([`NetworkId`], [`Conference`], [`Media`]) that bind an id
//!   to the client and expose the same operations plus derived accessors
//!   like [`NetworkId::exists`] or [`Media::download_url`].
//!
//! Calls are plain request/response: no retries, no caching, no state beyond
//! the application key, which can be swapped at runtime with
//! [`TelesocialClient::set_app_key`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use telesocial::TelesocialClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelesocialClient::builder()
//!         .app_key("65a1f558-1975-4cf3-9590-690e076633ba")
//!         .https(true)
//!         .build()?;
//!
//!     let version = client.version().await?;
//!     println!("server API version {version}");
//!
//!     // Register a caller and start a conference they lead.
//!     let leader = client.register_network_id("555-1234", Some("5551234"), None).await?;
//!     let conference = client.create_conference(leader.id(), None, None).await?;
//!
//!     // Pull another participant in, then wind the call down.
//!     conference.add(&["555-9876"], None).await?;
//!     conference.close().await?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod models;

pub use api::conference::{Conference, ConferenceApi};
pub use api::media::{Media, MediaApi};
pub use api::network_id::{NetworkId, NetworkIdApi};
pub use client::{TelesocialClient, TelesocialClientBuilder, DEFAULT_HOST};
pub use error::{TelesocialError, TelesocialResult};
pub use models::{
    deep_find, ApiResponse, ApiVersion, ConferenceListResponse, ConferenceResponse,
    MediaIdListResponse, MediaResponse, NetworkIdListResponse, UploadResponse,
};
