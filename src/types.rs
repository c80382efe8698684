//! Core types: readiness states and the device-reported public key.

use std::str::FromStr;

use thiserror::Error;

const PUBLIC_KEY_LEN: usize = 32;

/// Whether the host environment can support the signing device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadyState {
    /// The environment lacks the transport the device needs.
    Unsupported,
    NotDetected,
    Detected,
    Loadable,
    Installed,
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unsupported => "Unsupported",
            Self::NotDetected => "NotDetected",
            Self::Detected => "Detected",
            Self::Loadable => "Loadable",
            Self::Installed => "Installed",
        };
        f.write_str(s)
    }
}

/// 32-byte account public key, base58 encoded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePublicKeyError {
    #[error("invalid base58 encoding: {0}")]
    Encoding(String),

    #[error("expected 32 bytes, got {0}")]
    Length(usize),
}

impl PublicKey {
    pub fn to_bytes(self) -> [u8; PUBLIC_KEY_LEN] {
        self.0
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = ParsePublicKeyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; PUBLIC_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| ParsePublicKeyError::Length(bytes.len()))?;
        Ok(Self(key))
    }
}

impl FromStr for PublicKey {
    type Err = ParsePublicKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ParsePublicKeyError::Encoding(e.to_string()))?;
        Self::try_from(bytes.as_slice())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl std::fmt::LowerHex for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", hex::encode(self.0))
    }
}
