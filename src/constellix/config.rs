pub const DEFAULT_BASE_URL: &str = "https://api.dns.constellix.com/";

fn default_base_url() -> url::Url {
    url::Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    /// API key, or `@/path/to/file`.
    pub api_key: String,
    /// Secret used to sign requests, or `@/path/to/file`.
    pub secret_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: url::Url,
}
