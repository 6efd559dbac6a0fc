use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LoadArgs, PositiveU64, parse_header};
use crate::error::{AppError, AppResult, ConfigError};
use crate::logging::LoggerConfig;

use super::types::{ConfigFile, DurationValue};

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn config_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
}

/// Fill every argument the user did not pass explicitly from `config`, and
/// return the run logger settings from its `[logging]` section.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: ConfigFile,
) -> AppResult<LoggerConfig> {
    if !is_explicit(matches, "gateway_url")
        && let Some(url) = config.gateway_url
    {
        args.gateway_url = Some(url);
    }

    if !is_explicit(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = config_duration(duration, "duration")?;
    }

    if !is_explicit(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = PositiveU64::try_from(rate).map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "rate",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "test_names")
        && let Some(test_names) = config.test_names
    {
        args.test_names = test_names;
    }

    if !is_explicit(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_explicit(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = config_duration(timeout, "timeout")?;
    }

    if !is_explicit(matches, "cooldown")
        && let Some(cooldown) = config.cooldown.as_ref()
    {
        args.cooldown = Some(config_duration(cooldown, "cooldown")?);
    }

    if !is_explicit(matches, "account_username")
        && let Some(account_username) = config.account_username
    {
        args.account_username = account_username;
    }

    Ok(config.logging.unwrap_or_default())
}

/// Layer the CLI logging flags over `base`. Flags only ever widen what they
/// name: `--debug` turns debug on, `--quiet` turns info off, `--log-file`
/// replaces the path.
#[must_use]
pub fn merge_logging(args: &LoadArgs, mut base: LoggerConfig) -> LoggerConfig {
    if args.debug {
        base.debug = true;
    }
    if args.quiet {
        base.info = false;
    }
    if let Some(path) = args.log_file.as_deref() {
        base.log_file = Some(PathBuf::from(path));
    }
    base
}
