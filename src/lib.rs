//! Wallet adapter for the Keystone hardware wallet.
//!
//! Bridges a wallet-client framework to a signing device reached through an
//! external SDK: connects, exposes the account's public key, and forwards
//! transaction signing, translating device failures into [`AdapterError`].
//!
//! # Quick start
//!
//! ```no_run
//! use async_trait::async_trait;
//! use keystone_wallet_adapter::{
//!     AdapterConfig, AdapterError, BoxError, DeviceSession, DeviceSigningAdapter, NoopSink,
//!     ReadyState, SessionProvider,
//! };
//!
//! struct Keystone;
//!
//! #[async_trait]
//! impl DeviceSession for Keystone {
//!     type Transaction = Vec<u8>;
//!
//!     async fn get_account(&self) -> Result<String, BoxError> {
//!         Ok("5vkq46DkwT3JCSgFQ1BVTR3G6GyQ1UyQsha9r8Uu93Di".into())
//!     }
//!
//!     async fn sign_transaction(&self, tx: Vec<u8>) -> Result<Vec<u8>, BoxError> {
//!         Ok(tx)
//!     }
//!
//!     async fn sign_all_transactions(&self, txs: Vec<Vec<u8>>) -> Result<Vec<Vec<u8>>, BoxError> {
//!         Ok(txs)
//!     }
//! }
//!
//! struct Sdk;
//!
//! #[async_trait]
//! impl SessionProvider for Sdk {
//!     type Session = Keystone;
//!
//!     async fn open_session(&self) -> Result<Keystone, BoxError> {
//!         Ok(Keystone)
//!     }
//! }
//!
//! async fn run() -> Result<(), AdapterError> {
//!     let adapter =
//!         DeviceSigningAdapter::new(AdapterConfig::default(), &ReadyState::NotDetected, Sdk, NoopSink);
//!
//!     adapter.connect().await?;
//!     println!("connected: {}", adapter.public_key().unwrap());
//!
//!     let signed = adapter.sign_transaction(vec![0u8; 64]).await?;
//!     println!("signed {} bytes", signed.len());
//!
//!     adapter.disconnect().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`adapter`] -- the [`DeviceSigningAdapter`] state machine
//! - [`session`] -- the [`SessionProvider`] / [`DeviceSession`] seam to the device SDK
//! - [`readiness`] -- environment probes ([`ReadinessDetector`])
//! - [`events`] -- [`AdapterEvent`] and [`EventSink`]
//! - [`types`] -- [`PublicKey`], [`ReadyState`]
//!
//! # Feature flags
//!
//! - `hid` (default) -- `readiness::hid::HidReadiness`, which probes the USB HID bus for the device

pub mod adapter;
pub mod config;
pub mod error;
pub mod events;
pub mod readiness;
pub mod session;
pub mod types;

pub use adapter::DeviceSigningAdapter;
pub use config::AdapterConfig;
pub use error::{AdapterError, BoxError};
pub use events::{AdapterEvent, EventSink, NoopSink};
#[cfg(feature = "hid")]
pub use readiness::hid::HidReadiness;
pub use readiness::ReadinessDetector;
pub use session::{DeviceSession, SessionProvider, SessionTransaction};
pub use types::{ParsePublicKeyError, PublicKey, ReadyState};
