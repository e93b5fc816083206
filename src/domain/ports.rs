use crate::domain::model::{EngineOptions, NumberKind};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundMeaning {
    #[serde(rename = "type", default = "regular_kind")]
    pub kind: NumberKind,
    pub text: String,
}

fn regular_kind() -> NumberKind {
    NumberKind::Regular
}

/// Read-only interpretation store keyed by computed numbers.
///
/// A miss is reported as `None`. It is up to the renderer to decide what
/// "no interpretation" looks like.
pub trait MeaningLookup: Send + Sync {
    fn compound(&self, number: u32) -> Option<&CompoundMeaning>;
    fn karmic(&self, number: u32) -> Option<&str>;
    fn master(&self, number: u32) -> Option<&str>;
    fn single(&self, number: u32) -> Option<&str>;
}

pub trait ConfigProvider: Send + Sync {
    fn engine_options(&self) -> Result<EngineOptions>;
    fn meanings_path(&self) -> Option<&str>;
}
