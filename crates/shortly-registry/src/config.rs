use shortly_generator::base62::DEFAULT_CODE_LENGTH;
use std::path::PathBuf;
use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "https://short.ly";
pub const DEFAULT_STORAGE_PATH: &str = "urls.json";
pub const DEFAULT_MAX_GENERATE_ATTEMPTS: usize = 100;

/// Configures a [`UrlRegistry`](crate::UrlRegistry) instance.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RegistryConfig {
    /// Prefix for composed short links, e.g. `https://short.ly`.
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,
    /// Location of the JSON document backing the registry.
    #[builder(default = PathBuf::from(DEFAULT_STORAGE_PATH), setter(into))]
    pub storage_path: PathBuf,
    /// Length of generated short codes.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// How many generated codes may collide before `create` gives up.
    #[builder(default = DEFAULT_MAX_GENERATE_ATTEMPTS)]
    pub max_generate_attempts: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
