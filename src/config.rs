/// Wallet metadata reported to the wallet-client framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub name: String,
    pub url: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            name: "Keystone".into(),
            url: "https://keyst.one".into(),
        }
    }
}
