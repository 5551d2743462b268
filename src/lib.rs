pub mod app_state;
pub mod cli_args;
pub mod common;
pub mod history;
pub mod presets;
pub mod settings;
pub mod utm;

pub use common::{MergePolicy, NormalizationConfig, ParameterSet, SpaceMode};
pub use utm::{build_utm_url, normalize_pair, UtmError};
