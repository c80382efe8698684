use crate::readiness::ReadinessDetector;
use crate::types::ReadyState;

/// Probes the USB HID bus for a signing device.
///
/// - HID backend unavailable: [`ReadyState::Unsupported`]
/// - matching device plugged in: [`ReadyState::Detected`]
/// - otherwise: [`ReadyState::NotDetected`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HidReadiness {
    vendor_id: u16,
    usage_page: Option<u16>,
}

impl HidReadiness {
    pub fn new(vendor_id: u16) -> Self {
        Self {
            vendor_id,
            usage_page: None,
        }
    }

    /// Only count interfaces on this usage page (devices often expose several).
    #[must_use]
    pub fn with_usage_page(mut self, usage_page: u16) -> Self {
        self.usage_page = Some(usage_page);
        self
    }

    fn matches(&self, vendor_id: u16, usage_page: u16) -> bool {
        vendor_id == self.vendor_id && self.usage_page.map_or(true, |p| p == usage_page)
    }
}

impl ReadinessDetector for HidReadiness {
    fn detect(&self) -> ReadyState {
        let api = match hidapi::HidApi::new() {
            Ok(api) => api,
            Err(e) => {
                log::warn!("HID backend unavailable: {e}");
                return ReadyState::Unsupported;
            }
        };

        for info in api.device_list() {
            if self.matches(info.vendor_id(), info.usage_page()) {
                log::debug!(
                    "found HID device {:04x}:{:04x}",
                    info.vendor_id(),
                    info.product_id()
                );
                return ReadyState::Detected;
            }
        }

        ReadyState::NotDetected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_vendor_without_usage_page() {
        let probe = HidReadiness::new(0x1209);
        assert!(probe.matches(0x1209, 0x0001));
        assert!(probe.matches(0x1209, 0xFFA0));
        assert!(!probe.matches(0x2c97, 0x0001));
    }

    #[test]
    fn usage_page_narrows_match() {
        let probe = HidReadiness::new(0x1209).with_usage_page(0xFFA0);
        assert!(probe.matches(0x1209, 0xFFA0));
        assert!(!probe.matches(0x1209, 0x0001));
        assert!(!probe.matches(0x2c97, 0xFFA0));
    }
}
