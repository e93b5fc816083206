use crate::domain::ports::{CompoundMeaning, MeaningLookup};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    pub text: String,
}

/// Interpretation tables in the `meanings.json` layout. Keys are numbers
/// written as JSON strings, e.g. `{"single": {"1": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningsTable {
    #[serde(default)]
    pub compound: BTreeMap<u32, CompoundMeaning>,
    #[serde(default)]
    pub karmic: BTreeMap<u32, TextEntry>,
    #[serde(default)]
    pub master: BTreeMap<u32, TextEntry>,
    #[serde(default)]
    pub single: BTreeMap<u32, String>,
}

impl MeaningsTable {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading meanings from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded {} compound, {} karmic, {} master and {} single meanings",
            table.compound.len(),
            table.karmic.len(),
            table.master.len(),
            table.single.len()
        );
        Ok(table)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.compound.is_empty()
            && self.karmic.is_empty()
            && self.master.is_empty()
            && self.single.is_empty()
    }
}

impl MeaningLookup for MeaningsTable {
    fn compound(&self, number: u32) -> Option<&CompoundMeaning> {
        self.compound.get(&number)
    }

    fn karmic(&self, number: u32) -> Option<&str> {
        self.karmic.get(&number).map(|e| e.text.as_str())
    }

    fn master(&self, number: u32) -> Option<&str> {
        self.master.get(&number).map(|e| e.text.as_str())
    }

    fn single(&self, number: u32) -> Option<&str> {
        self.single.get(&number).map(String::as_str)
    }
}
