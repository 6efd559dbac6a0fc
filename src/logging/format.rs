use std::fmt::{self, Write};

use chrono::{DateTime, Local};

use super::level::Level;

/// Same layout as the standard Go `log` date and time flags.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Render `<TAG> <timestamp> <message>` terminated by exactly one newline.
pub(crate) fn render_line(
    level: Level,
    timestamp: &DateTime<Local>,
    args: fmt::Arguments<'_>,
) -> String {
    let mut line = String::new();
    if write!(
        line,
        "{} {} {}",
        level.tag(),
        timestamp.format(TIMESTAMP_FORMAT),
        args
    )
    .is_err()
    {
        // A user Display impl failed; keep whatever was rendered.
        line.push_str(" <formatting error>");
    }
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}
