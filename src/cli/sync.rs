use tabled::Table;

use crate::{
    cli::{auth, spinner},
    context::SyncContext,
    error, info,
    spotify::{HttpTransport, RemoteLibraryClient},
    success,
    sync::MonthBucketSync,
    types::{MonthTableRow, PlaylistResolution, SyncReport},
};

pub async fn sync(ctx: &SyncContext, dry_run: bool) {
    let session = match auth::session(ctx).await {
        Ok(session) => session,
        Err(e) => error!("Authorization failed: {}", e),
    };
    let client = RemoteLibraryClient::new(HttpTransport::new(session), &ctx.api_url);
    let engine = MonthBucketSync::new(&client);

    let pb = spinner(if dry_run {
        "Planning monthly playlists..."
    } else {
        "Syncing saved tracks into monthly playlists..."
    });
    let result = if dry_run {
        engine.plan().await
    } else {
        engine.run().await
    };
    pb.finish_and_clear();

    match result {
        Ok(report) => print_report(&report),
        Err(e) => error!("Sync failed: {}", e),
    }
}

fn print_report(report: &SyncReport) {
    if report.months.is_empty() {
        info!("No saved tracks found.");
        return;
    }

    let rows: Vec<MonthTableRow> = report
        .months
        .iter()
        .map(|m| MonthTableRow {
            month: m.label.clone(),
            playlist: match m.resolution {
                PlaylistResolution::Existing => "existing".to_string(),
                PlaylistResolution::Created => "created".to_string(),
                PlaylistResolution::Missing => "to be created".to_string(),
            },
            saved: m.pending,
            added: m.added.len(),
        })
        .collect();
    println!("{}", Table::new(rows));

    if report.dry_run {
        info!(
            "Dry run: {} tracks would be added, {} playlists created.",
            report.total_added(),
            report
                .months
                .iter()
                .filter(|m| m.resolution == PlaylistResolution::Missing)
                .count()
        );
    } else if report.total_added() == 0 {
        success!("Everything is up to date.");
    } else {
        success!(
            "Added {} tracks across {} months ({} playlists created).",
            report.total_added(),
            report.months.iter().filter(|m| !m.added.is_empty()).count(),
            report.created()
        );
    }
}
