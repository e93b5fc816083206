pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{OutputFormat, Settings, TomlConfig};

pub use adapters::MeaningsTable;
pub use app::{render_report, ReportContext};
pub use crate::core::analysis::analyze;
pub use crate::core::engine::{destiny, driver, kua, NumerologyEngine};
pub use crate::core::reduction::{digit_root, reduce};
pub use domain::model::{
    BirthDate, DestinyPolicy, DigitStats, Element, EngineOptions, Gender, LoShuGrid, NumberKind,
    NumerologyProfile, ProfileRequest, ReductionChain,
};
pub use domain::ports::{CompoundMeaning, ConfigProvider, MeaningLookup};
pub use utils::error::{NumerologyError, Result};
