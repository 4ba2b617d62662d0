//! Files saved tracks into one playlist per month.
//!
//! A run reads the user's id, playlists and saved tracks, walks the saved
//! tracks oldest first, and assigns each to the playlist named after the
//! month it was saved in (`January '24`). Missing playlists are created on
//! first use. Afterwards every month's playlist is read back and only the
//! tracks it does not contain yet are appended, so repeated runs add nothing
//! twice.
//!
//! Everything happens strictly in sequence. Creating a playlist at most
//! once per month relies on that: the label → playlist cache is only ever
//! touched by the one loop below.

use std::collections::HashMap;

use crate::{
    Result,
    spotify::Library,
    types::{MonthOutcome, NewPlaylist, PlaylistResolution, PlaylistSummary, SyncReport},
    utils::{missing_uris, month_label},
};

/// One month's target playlist and the URIs collected for it.
struct Bucket {
    label: String,
    playlist_id: Option<String>,
    resolution: PlaylistResolution,
    pending: Vec<String>,
}

pub struct MonthBucketSync<'a, L: Library + ?Sized> {
    library: &'a L,
}

impl<'a, L: Library + ?Sized> MonthBucketSync<'a, L> {
    pub fn new(library: &'a L) -> Self {
        Self { library }
    }

    /// Runs the sync, creating playlists and appending tracks.
    pub async fn run(&self) -> Result<SyncReport> {
        self.execute(false).await
    }

    /// Computes what [`run`](Self::run) would do without changing anything.
    ///
    /// Months without a playlist are reported as [`PlaylistResolution::Missing`]
    /// with every collected track counted as added, the same list a run
    /// appends to the playlist it creates.
    pub async fn plan(&self) -> Result<SyncReport> {
        self.execute(true).await
    }

    async fn execute(&self, dry_run: bool) -> Result<SyncReport> {
        let user_id = self.library.current_user_id().await?;
        let playlists = self.library.playlists().await?;
        let mut saved = self.library.saved_tracks().await?;
        log::info!(
            "{} saved tracks, {} playlists for user {}",
            saved.len(),
            playlists.len(),
            user_id
        );

        // The service lists newest first.
        saved.reverse();

        let mut buckets: Vec<Bucket> = Vec::new();
        let mut by_label: HashMap<String, usize> = HashMap::new();

        for entry in saved {
            let label = month_label(&entry.added_at);
            let index = match by_label.get(&label) {
                Some(&index) => index,
                None => {
                    let bucket = self
                        .resolve(label.clone(), &playlists, &user_id, dry_run)
                        .await?;
                    buckets.push(bucket);
                    by_label.insert(label, buckets.len() - 1);
                    buckets.len() - 1
                }
            };
            buckets[index].pending.push(entry.track.uri);
        }

        let mut report = SyncReport {
            months: Vec::with_capacity(buckets.len()),
            dry_run,
        };
        for bucket in buckets {
            if bucket.pending.is_empty() {
                continue;
            }
            report.months.push(self.merge(bucket, dry_run).await?);
        }

        Ok(report)
    }

    /// Finds the playlist named `label`, or creates it.
    async fn resolve(
        &self,
        label: String,
        playlists: &[PlaylistSummary],
        user_id: &str,
        dry_run: bool,
    ) -> Result<Bucket> {
        let (playlist_id, resolution) = match playlists.iter().find(|p| p.name == label) {
            Some(existing) => {
                log::debug!("found playlist {} ({})", label, existing.id);
                (Some(existing.id.clone()), PlaylistResolution::Existing)
            }
            None if dry_run => (None, PlaylistResolution::Missing),
            None => {
                let created = self
                    .library
                    .create_playlist(user_id, &NewPlaylist::public(label.as_str()))
                    .await?;
                log::info!("created playlist {} ({})", label, created.id);
                (Some(created.id), PlaylistResolution::Created)
            }
        };

        Ok(Bucket {
            label,
            playlist_id,
            resolution,
            pending: Vec::new(),
        })
    }

    /// Appends the bucket's tracks its playlist does not already contain.
    async fn merge(&self, bucket: Bucket, dry_run: bool) -> Result<MonthOutcome> {
        let added = match &bucket.playlist_id {
            Some(id) => {
                let playlist = self.library.get_playlist(id).await?;
                let delta = missing_uris(&bucket.pending, &playlist.track_uris);
                if !delta.is_empty() && !dry_run {
                    self.library.append_tracks(id, &delta).await?;
                    log::info!("added {} tracks to {}", delta.len(), bucket.label);
                }
                delta
            }
            None => bucket.pending.clone(),
        };

        Ok(MonthOutcome {
            label: bucket.label,
            playlist_id: bucket.playlist_id,
            resolution: bucket.resolution,
            pending: bucket.pending.len(),
            added,
        })
    }
}
