//! Inline `<script>` scanning for pages that embed their data as
//! `name = JSON.parse('<escaped literal>')` assignments.

use regex::Regex;
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::unescape::unescape_bytes;
use crate::error::{PitchsideError, Result};

/// Text content of every inline script block of a page, in document order
#[derive(Debug, Clone)]
pub struct ScriptBlocks {
    match_id: String,
    scripts: Vec<String>,
}

impl ScriptBlocks {
    pub fn parse(html: &str, match_id: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("script")
            .map_err(|e| PitchsideError::format(match_id, "script selector", e))?;

        let scripts: Vec<String> = document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .filter(|text| !text.trim().is_empty())
            .collect();

        debug!(match_id, blocks = scripts.len(), "collected inline scripts");
        Ok(Self {
            match_id: match_id.to_string(),
            scripts,
        })
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Raw, still-escaped literal assigned to `key` in the first block that has one
    pub fn find_literal(&self, key: &str) -> Result<Option<&str>> {
        let pattern = assignment_pattern(key)
            .map_err(|e| PitchsideError::format(&self.match_id, key, e))?;

        Ok(self.scripts.iter().find_map(|script| {
            pattern
                .captures(script)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        }))
    }

    /// Locate, unescape and deserialize the block assigned to `key`
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let literal = self
            .find_literal(key)?
            .ok_or_else(|| PitchsideError::ContentNotFound {
                match_id: self.match_id.clone(),
                key: key.to_string(),
            })?;

        let bytes = unescape_bytes(literal.as_bytes())
            .map_err(|e| PitchsideError::format(&self.match_id, key, e))?;

        serde_json::from_slice(&bytes).map_err(|e| PitchsideError::format(&self.match_id, key, e))
    }
}

fn assignment_pattern(key: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"{}\s+=\s+JSON\.parse\('(.*?)'\)",
        regex::escape(key)
    ))
}
