use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use time::{
    format_description::{self, parse},
    OffsetDateTime,
};
use tracing::Level;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, FmtSubscriber};

/// Name of the file the installed logger writes to.
static LOG_FILE: Mutex<Option<String>> = Mutex::new(None);

/// Sends every search trace to a timestamped file in the working directory.
///
/// The file logger is installed at most once per process; later calls keep writing to the same
/// file. If another global subscriber is already installed, no file is left behind.
pub fn init_logger() -> anyhow::Result<()> {
    let mut installed = LOG_FILE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(file_name) = installed.as_deref() {
        tracing::debug!(file_name, "file logger already installed");
        return Ok(());
    }
    let file_name = get_log_file_name()?;
    let existed = Path::new(&file_name).exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&file_name)
        .with_context(|| format!("could not open log file {file_name}"))?;
    let writer = BoxMakeWriter::new(file);
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(
        local_offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")?,
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(writer)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        if !existed {
            fs::remove_file(&file_name)
                .with_context(|| format!("could not remove unused log file {file_name}"))?;
        }
        tracing::warn!("a global subscriber is already set, not logging to file");
        return Ok(());
    }
    *installed = Some(file_name);
    Ok(())
}

fn get_log_file_name() -> anyhow::Result<String> {
    let format = parse("[year]-[month]-[day]_[hour]:[minute]:[second]_search_log.txt")?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(&format)?)
}
