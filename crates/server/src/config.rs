use serde::Deserialize;

/// Server configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Path to the clustered dataset CSV
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Path to the serialized cluster model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_data_path() -> String {
    "data/clustered_dataset.csv".to_string()
}

fn default_model_path() -> String {
    "data/movies_kmeans.json".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Settings {
    /// Load configuration from environment variables (with `.env` support)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Settings>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
