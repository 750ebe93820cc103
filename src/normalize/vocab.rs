//! Static translation tables from provider codes to canonical vocabulary.

use crate::error::{PitchsideError, Result};

/// An immutable provider-code lookup with an optional fallback.
///
/// Tables without a default reject unknown codes; tables with one map every
/// unknown or absent code onto it.
#[derive(Debug)]
pub struct VocabTable<T: 'static> {
    name: &'static str,
    entries: &'static [(&'static str, T)],
    default: Option<T>,
}

impl<T: Copy + 'static> VocabTable<T> {
    pub const fn strict(name: &'static str, entries: &'static [(&'static str, T)]) -> Self {
        Self {
            name,
            entries,
            default: None,
        }
    }

    pub const fn with_default(
        name: &'static str,
        entries: &'static [(&'static str, T)],
        default: T,
    ) -> Self {
        Self {
            name,
            entries,
            default: Some(default),
        }
    }

    pub fn get(&self, code: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, value)| *value)
    }

    pub fn translate(&self, code: Option<&str>, match_id: &str) -> Result<T> {
        if let Some(value) = code.and_then(|c| self.get(c)) {
            return Ok(value);
        }
        self.default.ok_or_else(|| PitchsideError::Mapping {
            match_id: match_id.to_string(),
            table: self.name,
            code: code.unwrap_or("<missing>").to_string(),
        })
    }
}
