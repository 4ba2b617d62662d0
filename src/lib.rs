//! Monthly Playlist Sync Library
//!
//! This library files a Spotify user's saved tracks into one playlist per month
//! of addition ("January '24", "February '24", ...). Playlists are created on
//! demand and only tracks that are not already present get appended, so running
//! the sync repeatedly is safe.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Environment loading and configuration values
//! - `context` - The [`context::SyncContext`] threaded through a run
//! - `error` - The crate-wide [`Error`] type
//! - `management` - Local persisted state (the stored credential)
//! - `spotify` - Authorization, transport, paging and the typed library client
//! - `sync` - The month bucketing and merge engine
//! - `types` - Data structures and type definitions
//! - `utils` - Month labels and delta helpers
//!
//! # Example
//!
//! ```
//! use monthsync::{config, context::SyncContext};
//!
//! #[tokio::main]
//! async fn main() -> monthsync::Result<()> {
//!     config::load_env();
//!     let ctx = SyncContext::from_env()?;
//!     // Build a session and run the sync...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod management;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching saved tracks...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authorization completed");
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal errors at the command boundary. The process exits
/// with status 1 right after printing.
///
/// # Example
///
/// ```
/// error!("Sync failed: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems the user should still notice, such as a
/// refreshed credential that could not be written back to disk.
///
/// # Example
///
/// ```
/// warning!("Stored credential is unreadable, authorizing again");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
