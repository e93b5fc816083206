// Adapters layer: concrete implementations of domain ports.

pub mod meanings;

pub use meanings::MeaningsTable;
