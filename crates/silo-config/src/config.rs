//! Configuration structures and loading.

use crate::env_file::EnvFile;
use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure, read from `silo.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    /// Document silos, in the order they are ingested.
    pub categories: Vec<CategoryConfig>,

    pub chunking: ChunkingConfig,

    pub embedding: EmbeddingConfig,

    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from a specific path. A missing file yields the
    /// defaults (an empty category list).
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Silo Configuration
# Knowledge-base ingestion: PDF silos -> fragments -> embeddings -> vector store

[general]
# Dotenv-style file holding GEMINI_API_KEY, SUPABASE_URL and
# SUPABASE_SERVICE_ROLE_KEY. UTF-8 and UTF-16 LE files are both accepted.
env_file = ".env"

# Document silos. Each category maps to one directory, scanned recursively
# for PDF files. Categories are ingested in the order listed here.
# [[categories]]
# name = "CORE"
# path = "/corpus/core-legislation"
#
# [[categories]]
# name = "PRACTICE"
# path = "/corpus/practice-cases"

[chunking]
# Fragment size in characters
fragment_size = 1000

# Fragments at or below this length are dropped
min_fragment_len = 100

[embedding]
# Gemini API endpoint
host = "https://generativelanguage.googleapis.com"

# Embedding model
model = "text-embedding-004"

# Task type sent with every request
task_type = "RETRIEVAL_DOCUMENT"

# Optional title attached to each embedding request
# title = "Library Document"

# Request timeout in seconds
timeout_seconds = 120

# Pause before each embedding call, in milliseconds (provider rate limit)
request_delay_ms = 500

[store]
# Vector table receiving the ingested records
table = "library_documents"

# Request timeout in seconds
timeout_seconds = 30
"#
        .to_string()
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Path to the dotenv-style credentials file.
    pub env_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            env_file: ".env".to_string(),
        }
    }
}

/// One document silo: a name and its source directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub path: String,
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Fragment window size in characters.
    pub fragment_size: usize,
    /// Fragments at or below this length are dropped.
    pub min_fragment_len: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            fragment_size: 1000,
            min_fragment_len: 100,
        }
    }
}

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub host: String,
    pub model: String,
    /// Purpose tag sent with each request.
    pub task_type: String,
    /// Optional document title attached to each request.
    pub title: Option<String>,
    pub timeout_seconds: u64,
    /// Pause before each embedding call, in milliseconds.
    pub request_delay_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            host: "https://generativelanguage.googleapis.com".to_string(),
            model: "text-embedding-004".to_string(),
            task_type: "RETRIEVAL_DOCUMENT".to_string(),
            title: None,
            timeout_seconds: 120,
            request_delay_ms: 500,
        }
    }
}

/// Vector store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Table receiving the ingested records.
    pub table: String,
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: "library_documents".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Credentials resolved from the env file. All three are required; a run
/// never starts with any of them missing.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Credentials {
    pub const REQUIRED_KEYS: [&'static str; 3] =
        ["GEMINI_API_KEY", "SUPABASE_URL", "SUPABASE_SERVICE_ROLE_KEY"];

    /// Resolve the required credential keys from a parsed env file.
    pub fn from_env_file(env: &EnvFile) -> ConfigResult<Self> {
        let resolved = env.resolve(&Self::REQUIRED_KEYS)?;
        Ok(Self {
            gemini_api_key: resolved["GEMINI_API_KEY"].clone(),
            supabase_url: resolved["SUPABASE_URL"]
                .trim_end_matches('/')
                .to_string(),
            supabase_service_key: resolved["SUPABASE_SERVICE_ROLE_KEY"].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.categories.is_empty());
        assert_eq!(config.chunking.fragment_size, 1000);
        assert_eq!(config.chunking.min_fragment_len, 100);
        assert_eq!(config.embedding.model, "text-embedding-004");
        assert_eq!(config.embedding.request_delay_ms, 500);
        assert_eq!(config.store.table, "library_documents");
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.categories.push(CategoryConfig {
            name: "CORE".to_string(),
            path: "/corpus/core".to_string(),
        });

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.categories.len(), 1);
        assert_eq!(deserialized.categories[0].name, "CORE");
        assert_eq!(deserialized.embedding.host, config.embedding.host);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [[categories]]
            name = "BOE"
            path = "/corpus/boe"

            [chunking]
            fragment_size = 500
            "#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.categories[0].name, "BOE");
        assert_eq!(config.chunking.fragment_size, 500);
        // Defaults still apply to everything not mentioned
        assert_eq!(config.chunking.min_fragment_len, 100);
        assert_eq!(config.embedding.task_type, "RETRIEVAL_DOCUMENT");
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/silo.toml")).unwrap();
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_default_config_string_parses() {
        let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
        assert_eq!(config.embedding.model, "text-embedding-004");
        assert_eq!(config.general.env_file, ".env");
    }

    #[test]
    fn test_category_order_preserved() {
        let config: Config = toml::from_str(
            r#"
            [[categories]]
            name = "CORE"
            path = "/a"

            [[categories]]
            name = "PRACTICE"
            path = "/b"

            [[categories]]
            name = "BOE"
            path = "/c"
            "#,
        )
        .unwrap();

        let names: Vec<&str> = config.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["CORE", "PRACTICE", "BOE"]);
    }

    #[test]
    fn test_credentials_require_all_keys() {
        let env = EnvFile::from_bytes(b"GEMINI_API_KEY=g\nSUPABASE_URL=https://x.supabase.co/\n");
        let err = Credentials::from_env_file(&env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKeys(_)));

        let env = EnvFile::from_bytes(
            b"GEMINI_API_KEY=g\nSUPABASE_URL=https://x.supabase.co/\nSUPABASE_SERVICE_ROLE_KEY=s\n",
        );
        let creds = Credentials::from_env_file(&env).unwrap();
        assert_eq!(creds.gemini_api_key, "g");
        // Trailing slash is normalized away
        assert_eq!(creds.supabase_url, "https://x.supabase.co");
        assert_eq!(creds.supabase_service_key, "s");
    }
}
