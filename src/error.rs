//! Error types and their wallet-standard names.

use std::sync::Arc;

use thiserror::Error;

/// Errors surfaced by the device SDK, boxed so any SDK error type fits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared so that the error handed to listeners and the one returned to the
/// caller are the same value.
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the adapter.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("wallet not ready - no supported transport for the signing device")]
    NotReady,

    #[error("failed to load device session: {message}")]
    Load {
        message: String,
        #[source]
        cause: Cause,
    },

    #[error("device returned an invalid public key: {message}")]
    PublicKey {
        message: String,
        #[source]
        cause: Cause,
    },

    #[error("wallet not connected")]
    NotConnected,

    #[error("failed to sign transaction: {message}")]
    SignTransaction {
        message: String,
        #[source]
        cause: Cause,
    },

    #[error("connection failed: {0}")]
    Connection(String),
}

impl AdapterError {
    pub(crate) fn load(cause: impl Into<BoxError>) -> Self {
        let (message, cause) = wrap(cause);
        Self::Load { message, cause }
    }

    pub(crate) fn public_key(cause: impl Into<BoxError>) -> Self {
        let (message, cause) = wrap(cause);
        Self::PublicKey { message, cause }
    }

    pub(crate) fn sign_transaction(cause: impl Into<BoxError>) -> Self {
        let (message, cause) = wrap(cause);
        Self::SignTransaction { message, cause }
    }

    /// Name used by wallet-adapter frameworks for this kind of error.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotReady => "WalletNotReadyError",
            Self::Load { .. } => "WalletLoadError",
            Self::PublicKey { .. } => "WalletPublicKeyError",
            Self::NotConnected => "WalletNotConnectedError",
            Self::SignTransaction { .. } => "WalletSignTransactionError",
            Self::Connection(_) => "WalletConnectionError",
        }
    }

    /// The underlying device or SDK error, if this error wraps one.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Load { cause, .. }
            | Self::PublicKey { cause, .. }
            | Self::SignTransaction { cause, .. } => Some(&**cause),
            Self::NotReady | Self::NotConnected | Self::Connection(_) => None,
        }
    }
}

fn wrap(cause: impl Into<BoxError>) -> (String, Cause) {
    let cause: Cause = Arc::from(cause.into());
    (cause.to_string(), cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("device busy")]
    struct Busy;

    #[test]
    fn load_keeps_message_and_cause() {
        let err = AdapterError::load(Busy);
        assert_eq!(err.to_string(), "failed to load device session: device busy");
        assert_eq!(err.cause().unwrap().to_string(), "device busy");
        assert!(err.cause().unwrap().downcast_ref::<Busy>().is_some());
    }

    #[test]
    fn source_is_wired() {
        let err = AdapterError::sign_transaction("user rejected");
        assert_eq!(err.source().unwrap().to_string(), "user rejected");
        assert!(AdapterError::NotConnected.source().is_none());
    }

    #[test]
    fn clone_shares_cause() {
        let err = AdapterError::public_key(Busy);
        let copy = err.clone();
        match (&err, &copy) {
            (
                AdapterError::PublicKey { cause: a, .. },
                AdapterError::PublicKey { cause: b, .. },
            ) => assert!(Arc::ptr_eq(a, b)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn unwrapped_kinds_have_no_cause() {
        assert!(AdapterError::NotReady.cause().is_none());
        assert!(AdapterError::NotConnected.cause().is_none());
        assert!(AdapterError::Connection("superseded".into()).cause().is_none());
    }

    #[test]
    fn wallet_standard_names() {
        assert_eq!(AdapterError::NotReady.name(), "WalletNotReadyError");
        assert_eq!(AdapterError::load("x").name(), "WalletLoadError");
        assert_eq!(AdapterError::public_key("x").name(), "WalletPublicKeyError");
        assert_eq!(AdapterError::NotConnected.name(), "WalletNotConnectedError");
        assert_eq!(
            AdapterError::sign_transaction("x").name(),
            "WalletSignTransactionError"
        );
        assert_eq!(
            AdapterError::Connection("x".into()).name(),
            "WalletConnectionError"
        );
    }
}
