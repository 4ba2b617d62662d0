use std::collections::HashSet;

use async_trait::async_trait;
use regex::Regex;
use serde_json::json;

use crate::{
    Result,
    spotify::{
        paging::PagedFetcher,
        transport::{ApiRequest, Transport},
    },
    types::{
        AddTracksRequest, NewPlaylist, Playlist, PlaylistResponse, PlaylistSummary, SavedTrack,
        User,
    },
};

/// Largest page the listing endpoints accept.
pub const PAGE_LIMIT: u32 = 50;

/// Most URIs a single add-items request may carry.
pub const ADD_TRACKS_LIMIT: usize = 100;

/// The operations the sync engine needs from the user's library.
#[async_trait]
pub trait Library: Send + Sync {
    async fn current_user_id(&self) -> Result<String>;

    /// All saved tracks, most recently saved first.
    async fn saved_tracks(&self) -> Result<Vec<SavedTrack>>;

    async fn playlists(&self) -> Result<Vec<PlaylistSummary>>;

    /// The playlist with the URIs of every track currently in it.
    async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist>;

    async fn create_playlist(&self, owner_id: &str, playlist: &NewPlaylist)
    -> Result<PlaylistSummary>;

    /// Appends `uris` in order. An empty slice sends nothing.
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;

    /// Unfollows the playlist, which is how the service deletes one.
    async fn delete_playlist(&self, playlist_id: &str) -> Result<()>;
}

/// Typed client for the Spotify Web API endpoints the sync uses.
pub struct RemoteLibraryClient<T: Transport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> RemoteLibraryClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deletes every playlist whose name matches `pattern`.
    ///
    /// Returns the removed playlists. Stops at the first failed deletion;
    /// playlists deleted before it stay deleted.
    pub async fn delete_playlists_matching(&self, pattern: &Regex) -> Result<Vec<PlaylistSummary>> {
        let matching = self.playlists_matching(pattern).await?;
        for playlist in &matching {
            log::info!("deleting playlist {} ({})", playlist.name, playlist.id);
            self.delete_playlist(&playlist.id).await?;
        }
        Ok(matching)
    }

    /// Lists the playlists whose name matches `pattern` without touching them.
    pub async fn playlists_matching(&self, pattern: &Regex) -> Result<Vec<PlaylistSummary>> {
        Ok(self
            .playlists()
            .await?
            .into_iter()
            .filter(|p| pattern.is_match(&p.name))
            .collect())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl<T: Transport> Library for RemoteLibraryClient<T> {
    async fn current_user_id(&self) -> Result<String> {
        let user: User = self
            .transport
            .send(ApiRequest::get(self.url("/me")))
            .await?
            .json("get current user")?;
        Ok(user.id)
    }

    async fn saved_tracks(&self) -> Result<Vec<SavedTrack>> {
        let url = self.url(&format!("/me/tracks?limit={}", PAGE_LIMIT));
        PagedFetcher::new(&self.transport, "list saved tracks")
            .all(&url)
            .await
    }

    async fn playlists(&self) -> Result<Vec<PlaylistSummary>> {
        let url = self.url(&format!("/me/playlists?limit={}", PAGE_LIMIT));
        PagedFetcher::new(&self.transport, "list playlists")
            .all(&url)
            .await
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist> {
        let playlist: PlaylistResponse = self
            .transport
            .send(ApiRequest::get(self.url(&format!("/playlists/{}", playlist_id))))
            .await?
            .json("get playlist")?;

        let items = PagedFetcher::new(&self.transport, "list playlist tracks")
            .drain(playlist.tracks)
            .await?;

        Ok(Playlist {
            id: playlist.id,
            name: playlist.name,
            track_uris: items
                .into_iter()
                .filter_map(|item| item.track.map(|t| t.uri))
                .collect::<HashSet<_>>(),
        })
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<PlaylistSummary> {
        let url = self.url(&format!("/users/{}/playlists", owner_id));
        self.transport
            .send(ApiRequest::post(url, json!(playlist)))
            .await?
            .json("create playlist")
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));
        for chunk in uris.chunks(ADD_TRACKS_LIMIT) {
            let body = json!(AddTracksRequest { uris: chunk });
            self.transport
                .send(ApiRequest::post(url.as_str(), body))
                .await?
                .error_for_status("add tracks to playlist")?;
        }
        Ok(())
    }

    async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        let url = self.url(&format!("/playlists/{}/followers", playlist_id));
        self.transport
            .send(ApiRequest::delete(url))
            .await?
            .error_for_status("delete playlist")?;
        Ok(())
    }
}
