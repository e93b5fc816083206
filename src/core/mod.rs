pub mod analysis;
pub mod engine;
pub mod reduction;

pub use crate::domain::model::{
    BirthDate, DestinyPolicy, DigitStats, EngineOptions, Gender, NumerologyProfile,
    ProfileRequest, ReductionChain,
};
pub use crate::domain::ports::{ConfigProvider, MeaningLookup};
pub use crate::utils::error::Result;
