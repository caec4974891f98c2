//! Dotenv-style credential file loading.
//!
//! The env files this tool meets in the wild are not reliably UTF-8: files
//! saved from PowerShell arrive as UTF-16 LE with a BOM, others as Windows-1252.
//! The loader decodes UTF-16 LE first, then UTF-8, then falls back to Latin-1,
//! strips a leading BOM and embedded NUL bytes, and parses `KEY=value` lines.

use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// A parsed key-value environment file.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Read and parse an env file from disk.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read(path)?;
        let env = Self::from_bytes(&raw);
        debug!("Loaded {} variables from {}", env.vars.len(), path.display());
        Ok(env)
    }

    /// Parse env-file content from raw bytes of unknown encoding.
    pub fn from_bytes(raw: &[u8]) -> Self {
        let content = decode(raw);
        Self::from_str_content(&content)
    }

    fn from_str_content(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut vars = HashMap::new();
        for line in content.lines() {
            // NUL bytes survive odd encodings; drop them before parsing.
            let line = line.replace('\0', "");
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let value = value.trim().trim_matches('"').trim_matches('\'');
            vars.insert(key.to_string(), value.to_string());
        }

        Self { vars }
    }

    /// Look up a single key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Resolve a set of required keys, failing if any is absent.
    ///
    /// The error names every missing key so a broken deployment is fixed in
    /// one round trip.
    pub fn resolve(&self, keys: &[&str]) -> ConfigResult<HashMap<String, String>> {
        let missing: Vec<&str> = keys
            .iter()
            .filter(|k| !self.vars.contains_key(**k))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing.join(", ")));
        }

        Ok(keys
            .iter()
            .map(|k| (k.to_string(), self.vars[*k].clone()))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Decode raw env-file bytes: UTF-16 LE, then UTF-8, then Latin-1.
fn decode(raw: &[u8]) -> String {
    if raw.starts_with(&[0xFF, 0xFE]) {
        return decode_utf16_le(&raw[2..]);
    }

    if looks_like_utf16_le(raw) {
        return decode_utf16_le(raw);
    }

    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        // Latin-1: every byte maps to the code point of the same value.
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}

fn decode_utf16_le(raw: &[u8]) -> String {
    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// UTF-16 LE text over a mostly-ASCII alphabet has a zero high byte for most
/// code units; BOM-less files are detected that way.
fn looks_like_utf16_le(raw: &[u8]) -> bool {
    if raw.len() < 4 || raw.len() % 2 != 0 {
        return false;
    }
    let high_zeros = raw.iter().skip(1).step_by(2).filter(|&&b| b == 0).count();
    high_zeros * 2 > raw.len() / 2
}
