use regex::Regex;
use tabled::Table;

use crate::{
    cli::{auth, spinner},
    context::SyncContext,
    error, info,
    spotify::{HttpTransport, RemoteLibraryClient},
    success,
    types::{PlaylistSummary, PlaylistTableRow},
    utils::MONTH_LABEL_PATTERN,
    warning,
};

/// Deletes playlists whose name matches `pattern`, by default every monthly
/// playlist. Without `confirmed` the matches are only listed.
pub async fn prune(ctx: &SyncContext, pattern: Option<String>, confirmed: bool) {
    let pattern = pattern.unwrap_or_else(|| MONTH_LABEL_PATTERN.to_string());
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => error!("{}", crate::Error::from(e)),
    };

    let session = match auth::session(ctx).await {
        Ok(session) => session,
        Err(e) => error!("Authorization failed: {}", e),
    };
    let client = RemoteLibraryClient::new(HttpTransport::new(session), &ctx.api_url);

    if !confirmed {
        let pb = spinner("Looking for matching playlists...");
        let matching = client.playlists_matching(&regex).await;
        pb.finish_and_clear();

        match matching {
            Ok(playlists) if playlists.is_empty() => info!("No playlist matches {}", pattern),
            Ok(playlists) => {
                print_playlists(&playlists);
                warning!(
                    "{} playlists match {}. Run again with --yes to delete them.",
                    playlists.len(),
                    pattern
                );
            }
            Err(e) => error!("Failed to list playlists: {}", e),
        }
        return;
    }

    let pb = spinner("Deleting matching playlists...");
    let deleted = client.delete_playlists_matching(&regex).await;
    pb.finish_and_clear();

    match deleted {
        Ok(playlists) if playlists.is_empty() => info!("No playlist matches {}", pattern),
        Ok(playlists) => {
            print_playlists(&playlists);
            success!("Deleted {} playlists.", playlists.len());
        }
        Err(e) => error!("Failed to delete playlists: {}", e),
    }
}

fn print_playlists(playlists: &[PlaylistSummary]) {
    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            id: p.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}
