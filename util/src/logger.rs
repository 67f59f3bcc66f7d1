//! Logger setup for workspace executables

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use fern;
use log::{self, info};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Could not create the log file: {0}")]
    LogFileError(std::io::Error),

    #[error("The global logger is already set: {0}")]
    AlreadyInit(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Records go to stdout and the session's log file. Each record is stamped
/// with the seconds elapsed since the session epoch, so log times line up
/// with playback times. Debug and trace records also carry their target so
/// verbose output can be traced back to a module.
///
/// Must be called once, after the session is created and before any other
/// work happens.
pub fn logger_init(
    min_level: LevelFilter,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileError)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            // Targets are only interesting when debugging, leave them out of
            // the nominal levels to keep the output scannable
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "{:9.3} {} [{}] {}",
                    session::get_elapsed_seconds(),
                    level_tag(record.level()),
                    record.target(),
                    message
                ))
            }
            else {
                out.finish(format_args!(
                    "{:9.3} {} {}",
                    session::get_elapsed_seconds(),
                    level_tag(record.level()),
                    message
                ))
            }
        })
        .level(min_level)
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::AlreadyInit)?;

    info!("Logging initialised at level {:?}", min_level);
    info!("    Log file: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the coloured tag for a log level
fn level_tag(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRACE".dimmed().italic(),
        log::Level::Debug => "DEBUG".dimmed(),
        log::Level::Info  => "INFO ".normal(),
        log::Level::Warn  => "WARN ".yellow(),
        log::Level::Error => "ERROR".red().bold()
    }
}
