pub mod constants;
pub mod time_utils;
pub mod types;

pub use types::{MergePolicy, NormalizationConfig, ParameterSet, SpaceMode};
