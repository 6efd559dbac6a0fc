/// Config filenames checked in the working directory when `--config` is not
/// given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["ocm-load.toml", "ocm-load.json"];

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("ocm-load/", env!("CARGO_PKG_VERSION"));

pub(super) const DEFAULT_DURATION: &str = "1m";
pub(super) const DEFAULT_RATE: &str = "10";
pub(super) const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
