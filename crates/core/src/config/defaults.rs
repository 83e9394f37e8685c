//! Default values and functions for configuration

pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";

pub(crate) fn default_batch_size() -> usize {
    3
}

pub(crate) fn default_batch_setup_delay_ms() -> u64 {
    5000
}

pub(crate) fn default_per_item_delay_ms() -> u64 {
    500
}

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) fn default_port() -> u16 {
    3000
}
