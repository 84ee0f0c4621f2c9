/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path of the JSON dataset.
    pub data_path: String,
    /// Key of the entry array inside the document.
    pub collection_key: String,
    pub pretty: bool,
}

pub const DEFAULT_DATA_PATH: &str = "mock_data.json";
pub const DEFAULT_COLLECTION_KEY: &str = "resonance_drift_log";

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
            pretty: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_path: std::env::var("DRIFT_DATA").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string()),
            collection_key: std::env::var("DRIFT_COLLECTION")
                .unwrap_or_else(|_| DEFAULT_COLLECTION_KEY.to_string()),
            pretty: std::env::var("OUTPUT_PRETTY").as_deref() == Ok("1"),
        }
    }

    pub fn with_data_path(mut self, path: impl Into<String>) -> Self {
        self.data_path = path.into();
        self
    }
}
