use std::cell::Cell;
use std::path::Path;
use std::sync::Arc;

use tempfile::tempdir;

use super::*;
use crate::context::Context;
use crate::error::LoggingError;

fn with_memory_console(builder: LoggerBuilder) -> Result<(Logger, Arc<MemorySink>), String> {
    let console = Arc::new(MemorySink::new());
    let logger = builder
        .console(Arc::clone(&console) as Arc<dyn Sink>)
        .build()
        .map_err(|err| format!("build failed: {}", err))?;
    Ok((logger, console))
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("read log file failed: {}", err))
}

#[test]
fn defaults_enable_info_warn_error_only() -> Result<(), String> {
    let config = LoggerConfig::default();
    if config.debug || !config.info || !config.warn || !config.error {
        return Err(format!("Unexpected default flags: {:?}", config));
    }
    if config.log_file_path().is_some() {
        return Err("Default config must be console only".to_owned());
    }
    Ok(())
}

#[test]
fn disabled_levels_write_nothing() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("run.log");
    let builder = LoggerBuilder::new()
        .debug(false)
        .info(false)
        .warn(false)
        .error(false)
        .log_file(&path);
    let (logger, console) = with_memory_console(builder)?;
    let ctx = Context::background();

    for attempt in 0..25 {
        logger.debug(&ctx, format_args!("debug {}", attempt));
        logger.info(&ctx, format_args!("info {}", attempt));
        logger.warn(&ctx, format_args!("warn {}", attempt));
        logger.error(&ctx, format_args!("error {}", attempt));
    }

    if !console.contents().is_empty() {
        return Err(format!("Unexpected console output: {}", console.contents()));
    }
    let contents = read_file(&path)?;
    if !contents.is_empty() {
        return Err(format!("Unexpected file output: {}", contents));
    }
    Ok(())
}

#[test]
fn disabled_level_macro_skips_argument_evaluation() -> Result<(), String> {
    let (logger, console) = with_memory_console(LoggerBuilder::new())?;
    let ctx = Context::background();
    let evaluated = Cell::new(0_u32);
    let count = || {
        evaluated.set(evaluated.get().saturating_add(1));
        "value"
    };

    crate::log_debug!(logger, &ctx, "debug {}", count());
    if evaluated.get() != 0 {
        return Err("Disabled debug evaluated its arguments".to_owned());
    }

    crate::log_info!(logger, &ctx, "info {}", count());
    if evaluated.get() != 1 {
        return Err(format!("Expected one evaluation, got {}", evaluated.get()));
    }
    if !console.contents().contains("[INFO]") {
        return Err("Expected info line on console".to_owned());
    }
    Ok(())
}

#[test]
fn info_without_file_goes_to_console_and_creates_no_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let (logger, console) = with_memory_console(LoggerBuilder::new().info(true).log_file(""))?;
    let ctx = Context::background();

    crate::log_info!(logger, &ctx, "started {}", "run1");

    let lines = console.lines();
    let [line] = lines.as_slice() else {
        return Err(format!("Expected one console line, got {:?}", lines));
    };
    if !line.starts_with("[INFO] ") || !line.ends_with("started run1") {
        return Err(format!("Unexpected console line: {}", line));
    }
    if logger.log_file_enabled() {
        return Err("Empty path must not enable the file sink".to_owned());
    }
    let entries = std::fs::read_dir(dir.path())
        .map_err(|err| format!("read_dir failed: {}", err))?
        .count();
    if entries != 0 {
        return Err(format!("Expected no files, found {}", entries));
    }
    Ok(())
}

#[test]
fn error_with_file_tees_to_console_and_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("x.log");
    let (logger, console) =
        with_memory_console(LoggerBuilder::new().error(true).log_file(&path))?;
    let ctx = Context::background();

    crate::log_error!(logger, &ctx, "failed: {}", 42);

    let console_output = console.contents();
    if !console_output.contains("[ERROR] ") || !console_output.contains("failed: 42") {
        return Err(format!("Unexpected console output: {}", console_output));
    }
    let file_output = read_file(&path)?;
    if file_output != console_output {
        return Err(format!(
            "File and console differ: {:?} vs {:?}",
            file_output, console_output
        ));
    }
    Ok(())
}

#[test]
fn error_without_file_goes_to_console_only() -> Result<(), String> {
    let (logger, console) = with_memory_console(LoggerBuilder::new())?;
    let ctx = Context::background();

    logger.error(&ctx, format_args!("request failed: {}", "timeout"));

    if console.lines().len() != 1 {
        return Err(format!("Expected one console line, got {:?}", console.lines()));
    }
    if logger.log_file().is_some() {
        return Err("Expected no log file".to_owned());
    }
    Ok(())
}

#[test]
fn lower_levels_with_file_stay_off_the_console() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("run.log");
    let (logger, console) =
        with_memory_console(LoggerBuilder::new().debug(true).log_file(&path))?;
    let ctx = Context::background();

    logger.debug(&ctx, format_args!("dispatching"));
    logger.info(&ctx, format_args!("executing test"));
    logger.warn(&ctx, format_args!("status 503"));

    if !console.contents().is_empty() {
        return Err(format!("Unexpected console output: {}", console.contents()));
    }
    let contents = read_file(&path)?;
    let tags: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.split(' ').next())
        .collect();
    if tags != ["[DEBUG]", "[INFO]", "[WARN]"] {
        return Err(format!("Unexpected tags in file: {:?}", tags));
    }
    Ok(())
}

#[test]
fn info_line_round_trips_into_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("run.log");
    let (logger, _console) = with_memory_console(LoggerBuilder::new().log_file(&path))?;
    let ctx = Context::background();

    logger.error(&ctx, format_args!("before"));
    logger.warn(&ctx, format_args!("also before"));
    logger.info(&ctx, format_args!("Executing test: {} at {} req/s", "list-clusters", 10));
    logger.error(&ctx, format_args!("after"));

    let contents = read_file(&path)?;
    let found = contents.lines().any(|line| {
        line.starts_with("[INFO] ") && line.ends_with(" Executing test: list-clusters at 10 req/s")
    });
    if !found {
        return Err(format!("Info line missing from file: {}", contents));
    }
    Ok(())
}

#[test]
fn existing_file_is_appended_to() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("run.log");
    std::fs::write(&path, "previous run\n").map_err(|err| format!("write failed: {}", err))?;

    let (logger, _console) = with_memory_console(LoggerBuilder::new().log_file(&path))?;
    logger.info(&Context::background(), format_args!("next run"));
    logger.close();

    let contents = read_file(&path)?;
    if !contents.starts_with("previous run\n") || !contents.contains("next run") {
        return Err(format!("Expected appended content, got {:?}", contents));
    }
    Ok(())
}

#[test]
fn close_is_idempotent() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("run.log");
    let (logger, console) = with_memory_console(LoggerBuilder::new().log_file(&path))?;
    let ctx = Context::background();

    if !logger.log_file_open() {
        return Err("Expected open log file".to_owned());
    }
    logger.close();
    logger.close();
    logger.close();
    if logger.log_file_open() {
        return Err("Expected closed log file".to_owned());
    }

    logger.info(&ctx, format_args!("dropped"));
    logger.error(&ctx, format_args!("still on console"));
    if read_file(&path)?.contains("dropped") {
        return Err("Closed file must not receive lines".to_owned());
    }
    if !console.contents().contains("still on console") {
        return Err("Error after close must still reach the console".to_owned());
    }
    Ok(())
}

#[test]
fn close_without_file_is_a_no_op() {
    let logger = LoggerBuilder::new()
        .console(Arc::new(MemorySink::new()))
        .build();
    if let Ok(logger) = logger {
        logger.close();
        logger.close();
    }
}

#[test]
fn fatal_is_never_gated_and_releases_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("run.log");
    let builder = LoggerBuilder::new()
        .info(false)
        .warn(false)
        .error(false)
        .log_file(&path);
    let (logger, console) = with_memory_console(builder)?;
    let ctx = Context::background();

    let signal = logger.fatal(&ctx, format_args!("gateway {} unreachable", "http://gw"));

    if signal.message() != "gateway http://gw unreachable" {
        return Err(format!("Unexpected fatal message: {}", signal.message()));
    }
    if signal.exit_code() != FATAL_EXIT_CODE || FATAL_EXIT_CODE == 0 {
        return Err("Fatal exit code must be non-zero".to_owned());
    }
    let console_lines = console.lines();
    if console_lines.len() != 1 {
        return Err(format!("Expected one console line, got {:?}", console_lines));
    }
    let file_lines: Vec<String> = read_file(&path)?.lines().map(str::to_owned).collect();
    if file_lines != console_lines {
        return Err(format!("File {:?} vs console {:?}", file_lines, console_lines));
    }
    if !file_lines.iter().all(|line| line.starts_with("[FATAL] ")) {
        return Err(format!("Expected fatal tag: {:?}", file_lines));
    }
    if logger.log_file_open() {
        return Err("Fatal must release the log file".to_owned());
    }
    logger.close();
    Ok(())
}

#[test]
fn fatal_without_file_writes_console_once() -> Result<(), String> {
    let (logger, console) = with_memory_console(LoggerBuilder::new().error(false))?;
    let signal = logger.fatal(&Context::background(), format_args!("boom"));
    if console.lines().len() != 1 {
        return Err(format!("Expected one line, got {:?}", console.lines()));
    }
    let err: crate::error::AppError = signal.into();
    if !err.to_string().contains("boom") {
        return Err(format!("Unexpected error text: {}", err));
    }
    Ok(())
}

#[test]
fn build_reports_unopenable_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("missing").join("run.log");

    match LoggerBuilder::new().log_file(&path).build() {
        Err(LoggingError::OpenLogFile { path: reported, .. }) if reported == path => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected build to fail".to_owned()),
    }
}

#[test]
fn concurrent_errors_reach_both_destinations() -> Result<(), String> {
    const THREADS: usize = 16;
    const PER_THREAD: usize = 250;

    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("stress.log");
    let (logger, console) = with_memory_console(LoggerBuilder::new().log_file(&path))?;
    let logger = Arc::new(logger);

    std::thread::scope(|scope| {
        for worker in 0..THREADS {
            let logger = Arc::clone(&logger);
            scope.spawn(move || {
                let ctx = Context::background().for_test("stress");
                for seq in 0..PER_THREAD {
                    logger.error(&ctx, format_args!("worker {} line {}", worker, seq));
                    if seq % 10 == 0 {
                        logger.info(&ctx, format_args!("worker {} progress {}", worker, seq));
                    }
                }
            });
        }
    });
    logger.close();

    let expected = THREADS.saturating_mul(PER_THREAD);
    let console_errors = console
        .lines()
        .iter()
        .filter(|line| line.starts_with("[ERROR] "))
        .count();
    let console_infos = console
        .lines()
        .iter()
        .filter(|line| line.starts_with("[INFO] "))
        .count();
    let file_contents = read_file(&path)?;
    let file_errors = file_contents
        .lines()
        .filter(|line| line.starts_with("[ERROR] "))
        .count();
    let file_infos = file_contents
        .lines()
        .filter(|line| line.starts_with("[INFO] "))
        .count();

    if console_errors != expected || file_errors != expected {
        return Err(format!(
            "Expected {} error lines per destination, console={} file={}",
            expected, console_errors, file_errors
        ));
    }
    if console_infos != 0 {
        return Err(format!("Info lines leaked to console: {}", console_infos));
    }
    let expected_infos = THREADS.saturating_mul(PER_THREAD.div_ceil(10));
    if file_infos != expected_infos {
        return Err(format!(
            "Expected {} info lines in file, got {}",
            expected_infos, file_infos
        ));
    }
    Ok(())
}

#[test]
fn logger_config_reads_partial_toml() -> Result<(), String> {
    let config: LoggerConfig = toml::from_str("debug = true\nlog_file = \"/tmp/ocm-load.log\"\n")
        .map_err(|err| format!("parse failed: {}", err))?;
    if !config.debug || !config.info || !config.warn || !config.error {
        return Err(format!("Unexpected flags: {:?}", config));
    }
    if config.log_file_path() != Some(Path::new("/tmp/ocm-load.log")) {
        return Err(format!("Unexpected log file: {:?}", config.log_file));
    }
    Ok(())
}

#[test]
fn level_gate_always_allows_fatal() {
    let gate = LevelGate::silent();
    assert!(gate.allows(Level::Fatal));
    assert!(!gate.allows(Level::Error));
    assert!(LevelGate::default().allows(Level::Info));
    assert!(!LevelGate::default().allows(Level::Debug));
}
