use std::sync::{Arc, Mutex, PoisonError};

use super::level::Level;
use super::sink::{FileSink, Sink, TeeSink};

/// Per-logger routing of rendered lines.
///
/// | level               | with log file       | console only |
/// |---------------------|---------------------|--------------|
/// | debug / info / warn | file                | console      |
/// | error / fatal       | console + file      | console      |
///
/// Each emission holds `emit_lock` for the whole routed write, so both
/// halves of a tee land before the next line starts.
#[derive(Debug)]
pub(crate) struct SinkRouter {
    console: Arc<dyn Sink>,
    file: Option<Arc<FileSink>>,
    tee: Option<TeeSink>,
    emit_lock: Mutex<()>,
}

impl SinkRouter {
    pub(crate) fn new(console: Arc<dyn Sink>, file: Option<FileSink>) -> Self {
        let file = file.map(Arc::new);
        let tee = file.as_ref().map(|file| {
            let file = Arc::clone(file) as Arc<dyn Sink>;
            TeeSink::new(Arc::clone(&console), file)
        });
        Self {
            console,
            file,
            tee,
            emit_lock: Mutex::new(()),
        }
    }

    pub(crate) fn route(&self, level: Level) -> &dyn Sink {
        match (self.file.as_deref(), self.tee.as_ref()) {
            (Some(_), Some(tee)) if level.tees_to_console() => tee as &dyn Sink,
            (Some(file), _) if !level.tees_to_console() => file as &dyn Sink,
            _ => self.console.as_ref(),
        }
    }

    /// Write failures are dropped here; the run logger never reports its
    /// own output errors.
    pub(crate) fn emit(&self, level: Level, line: &str) {
        let _emitting = self.emit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        drop(self.route(level).write_line(line));
    }

    pub(crate) fn file(&self) -> Option<&FileSink> {
        self.file.as_deref()
    }

    /// Close the file sink if there is one. Idempotent.
    pub(crate) fn close(&self) {
        let _emitting = self.emit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = self.file.as_ref()
            && file.close()
        {
            tracing::debug!("Closed run log file {}", file.path().display());
        }
    }
}
