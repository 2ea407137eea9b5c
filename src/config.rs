/// Connection settings for one Core space.
///
/// Constructed once by the host and handed to [`crate::Bridge::new`]; nothing
/// in the adapter mutates it afterwards.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Username for Basic authentication against the space.
    pub username: String,
    /// Password for Basic authentication against the space.
    pub password: String,
    /// Root URL of the space, e.g. `https://space.example.com/acme`.
    pub base_url: String,
}

impl BridgeConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self { username: username.into(), password: password.into(), base_url: base_url.into() }
    }
}
