mod parse_bad;
mod property_streaming;
pub(crate) mod utils;
