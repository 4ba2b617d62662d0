//! # CLI Module
//!
//! User-facing commands. Each one builds what it needs from the
//! [`SyncContext`](crate::context::SyncContext), runs, and reports through the
//! crate's console macros. Fatal errors end the process with status 1.
//!
//! ## Commands
//!
//! - [`sync`] - files saved tracks into monthly playlists (`--dry-run` to preview)
//! - [`auth`] - runs the authorization flow and stores a fresh credential
//! - [`prune`] - deletes playlists by name pattern, monthly ones by default
//!
//! ## Authorization
//!
//! `sync` and `prune` reuse the stored credential. When there is none, or it
//! cannot be parsed, they print the authorization URL, try to open it in a
//! browser, and wait for the user to paste the code from the redirect.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod auth;
mod prune;
mod sync;

pub use auth::auth;
pub use auth::session;
pub use prune::prune;
pub use sync::sync;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
