mod builder;
mod error;
mod normalize;
mod validation;

pub use builder::build_utm_url;
pub use error::UtmError;
pub use normalize::normalize_pair;
pub use validation::{missing_required_keys, valid_host};
