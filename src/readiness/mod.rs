//! Environment capability probes, evaluated once when the adapter is built.
//!
//! - [`ReadyState`] -- a fixed answer, for hosts that already know
//! - `hid::HidReadiness` -- enumerates USB HID devices (feature `hid`, default)

#[cfg(feature = "hid")]
pub mod hid;

use crate::types::ReadyState;

pub trait ReadinessDetector {
    fn detect(&self) -> ReadyState;
}

impl ReadinessDetector for ReadyState {
    fn detect(&self) -> ReadyState {
        *self
    }
}
