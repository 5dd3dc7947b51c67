//! File sink for the `tracing` fmt layer

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;

use crate::logger::config::FileConfig;

/// Opens the configured log file, creating parent directories first.
///
/// The returned `Mutex<File>` implements `MakeWriter` through
/// tracing-subscriber's blanket impl.
pub(crate) fn open_file_writer(config: &FileConfig) -> anyhow::Result<Mutex<File>> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = open_log_file(&config.path, config.append)
        .with_context(|| format!("Failed to open log file {}", config.path.display()))?;
    Ok(Mutex::new(file))
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}
