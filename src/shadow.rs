use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::reading::{InterpretationVariant, Reading};

pub const TOKEN_LEN: usize = 12;

/// The partially obscured payload a shadow link points at. The
/// recipient sees the card, not the interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowBlob {
    pub card: String,
    pub variant: InterpretationVariant,
    pub blurred: bool,
}

/// Reversible-encode the reading id plus creation instant, then keep
/// only alphanumerics, truncated to 12. Purely a client-side naming
/// convention; nothing validates these server-side.
pub fn shadow_token(reading_id: i64, now: DateTime<Utc>) -> String {
    let raw = format!("{}-{}", reading_id, now.timestamp_millis());
    let filtered: String = STANDARD
        .encode(raw)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    // The tail, not the head: leading characters encode the highest
    // timestamp digits and barely change between nearby tokens.
    filtered[filtered.len().saturating_sub(TOKEN_LEN)..].to_string()
}

pub fn shadow_url(token: &str) -> String {
    format!("https://mysticloop.app/?shadow={}", token)
}

/// Durable map of token to blob, one JSON file.
#[derive(Debug)]
pub struct ShadowStore {
    config: Config,
    blobs: HashMap<String, ShadowBlob>,
}

impl ShadowStore {
    pub fn load(config: Config) -> Self {
        let blobs = std::fs::read_to_string(config.shadows_file())
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        ShadowStore { config, blobs }
    }

    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.blobs)?;
        std::fs::write(self.config.shadows_file(), content)?;
        Ok(())
    }

    /// Create a shadow send for a reading and return its token.
    pub fn create(&mut self, reading: &Reading, now: DateTime<Utc>) -> Result<String> {
        let token = shadow_token(reading.id, now);
        self.blobs.insert(
            token.clone(),
            ShadowBlob {
                card: reading.card.clone(),
                variant: reading.variant,
                blurred: true,
            },
        );
        self.save()?;
        Ok(token)
    }

    pub fn lookup(&self, token: &str) -> Result<&ShadowBlob> {
        self.blobs
            .get(token)
            .ok_or_else(|| StoreError::ShadowNotFound(token.to_string()))
    }
}
