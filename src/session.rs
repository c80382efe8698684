//! The seam to the device SDK.
//!
//! - [`SessionProvider`] -- opens a session with the physical device
//! - [`DeviceSession`] -- an open session that can report its account and sign
//!
//! Both are implemented by the SDK integration, not by this crate.

use async_trait::async_trait;

use crate::error::BoxError;

#[async_trait]
pub trait DeviceSession: Send + Sync + 'static {
    /// Opaque to the adapter; forwarded to the device untouched.
    type Transaction: Send + 'static;

    /// Account identifier as the device reports it (base58 public key).
    async fn get_account(&self) -> Result<String, BoxError>;

    async fn sign_transaction(
        &self,
        transaction: Self::Transaction,
    ) -> Result<Self::Transaction, BoxError>;

    /// The whole batch goes to the device in one call. Whether a partial
    /// failure is possible is up to the device.
    async fn sign_all_transactions(
        &self,
        transactions: Vec<Self::Transaction>,
    ) -> Result<Vec<Self::Transaction>, BoxError>;

    /// Tear down the session.
    ///
    /// The default does nothing; only sessions holding a transport open
    /// need to override this.
    async fn close(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync + 'static {
    type Session: DeviceSession;

    /// May fail when the device is missing, busy, or the user cancels.
    async fn open_session(&self) -> Result<Self::Session, BoxError>;
}

/// The transaction type handled by a provider's sessions.
pub type SessionTransaction<P> =
    <<P as SessionProvider>::Session as DeviceSession>::Transaction;
