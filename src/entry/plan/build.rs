use clap::ArgMatches;

use crate::args::{Command, LoadArgs};
use crate::config::{apply_config, load_config, merge_logging};
use crate::error::AppResult;

use super::types::{LoadPlan, RunPlan};

pub(crate) fn build_plan(mut args: LoadArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if matches!(args.command, Some(Command::List)) {
        return Ok(RunPlan::List);
    }

    let file_logging = match load_config(args.config.as_deref())? {
        Some(config) => apply_config(&mut args, matches, config)?,
        None => crate::logging::LoggerConfig::default(),
    };
    let logging = merge_logging(&args, file_logging);
    tracing::debug!("Run logger settings: {:?}", logging);

    Ok(RunPlan::Load(Box::new(LoadPlan { args, logging })))
}
