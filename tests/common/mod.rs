#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{Value, json};

use monthsync::{
    Error, Result,
    spotify::{ApiRequest, ApiResponse, Library, Method, Transport},
    types::{NewPlaylist, Playlist, PlaylistSummary, SavedTrack, TrackRef},
};

pub const BASE: &str = "https://api.test/v1";

/// Answers requests from a fixed routing table and records every request.
/// Unknown routes answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), (u16, String)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, url: &str, status: u16, body: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), (status, body.to_string()));
        self
    }

    pub fn on_raw(self, method: Method, url: &str, status: u16, body: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), (status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(&(request.method, request.url.clone()))
            .cloned();
        self.requests.lock().unwrap().push(request);

        let (status, body) = route.unwrap_or_else(|| {
            (
                404,
                json!({"error": {"status": 404, "message": "Not found."}}).to_string(),
            )
        });
        Ok(ApiResponse { status, body })
    }
}

pub fn page(items: Value, next: Option<&str>) -> Value {
    json!({ "items": items, "next": next })
}

pub fn saved(added_at: &str, uri: &str) -> SavedTrack {
    SavedTrack {
        added_at: DateTime::parse_from_rfc3339(added_at).unwrap(),
        track: TrackRef {
            uri: uri.to_string(),
            name: None,
        },
    }
}

pub fn uris(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Default)]
struct LibraryState {
    playlists: Vec<(PlaylistSummary, Vec<String>)>,
    saved: Vec<SavedTrack>,
    creates: Vec<NewPlaylist>,
    appends: Vec<(String, Vec<String>)>,
    append_calls: usize,
    fail_appends: bool,
}

/// In-memory library. Saved tracks are given newest first, like the service
/// returns them.
pub struct FakeLibrary {
    user_id: String,
    state: Mutex<LibraryState>,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self {
            user_id: "listener".to_string(),
            state: Mutex::new(LibraryState::default()),
        }
    }

    pub fn with_playlist(self, id: &str, name: &str, tracks: &[&str]) -> Self {
        self.state.lock().unwrap().playlists.push((
            PlaylistSummary {
                id: id.to_string(),
                name: name.to_string(),
            },
            uris(tracks),
        ));
        self
    }

    pub fn with_saved(self, tracks: Vec<SavedTrack>) -> Self {
        self.state.lock().unwrap().saved = tracks;
        self
    }

    pub fn failing_appends(self) -> Self {
        self.state.lock().unwrap().fail_appends = true;
        self
    }

    pub fn save_track(&self, track: SavedTrack) {
        self.state.lock().unwrap().saved.insert(0, track);
    }

    pub fn creates(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .creates
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn appends(&self) -> Vec<(String, Vec<String>)> {
        self.state.lock().unwrap().appends.clone()
    }

    /// Every `append_tracks` call, including ones with nothing to append.
    pub fn append_calls(&self) -> usize {
        self.state.lock().unwrap().append_calls
    }

    pub fn clear_calls(&self) {
        let mut state = self.state.lock().unwrap();
        state.creates.clear();
        state.appends.clear();
        state.append_calls = 0;
    }

    pub fn tracks_of(&self, name: &str) -> Option<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .playlists
            .iter()
            .find(|(p, _)| p.name == name)
            .map(|(_, tracks)| tracks.clone())
    }

    pub fn playlist_count(&self) -> usize {
        self.state.lock().unwrap().playlists.len()
    }
}

#[async_trait]
impl Library for FakeLibrary {
    async fn current_user_id(&self) -> Result<String> {
        Ok(self.user_id.clone())
    }

    async fn saved_tracks(&self) -> Result<Vec<SavedTrack>> {
        Ok(self.state.lock().unwrap().saved.clone())
    }

    async fn playlists(&self) -> Result<Vec<PlaylistSummary>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .playlists
            .iter()
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist> {
        let state = self.state.lock().unwrap();
        let (summary, tracks) = state
            .playlists
            .iter()
            .find(|(p, _)| p.id == playlist_id)
            .ok_or_else(|| Error::Remote {
                context: "get playlist".to_string(),
                status: 404,
                message: "Not found.".to_string(),
            })?;
        Ok(Playlist {
            id: summary.id.clone(),
            name: summary.name.clone(),
            track_uris: tracks.iter().cloned().collect::<HashSet<_>>(),
        })
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<PlaylistSummary> {
        assert_eq!(owner_id, self.user_id);
        let mut state = self.state.lock().unwrap();
        let summary = PlaylistSummary {
            id: format!("created-{}", state.creates.len() + 1),
            name: playlist.name.clone(),
        };
        state.creates.push(playlist.clone());
        state.playlists.push((summary.clone(), Vec::new()));
        Ok(summary)
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.append_calls += 1;
        if uris.is_empty() {
            return Ok(());
        }
        if state.fail_appends {
            return Err(Error::Remote {
                context: "add tracks to playlist".to_string(),
                status: 500,
                message: "Server error".to_string(),
            });
        }
        state
            .appends
            .push((playlist_id.to_string(), uris.to_vec()));
        let (_, tracks) = state
            .playlists
            .iter_mut()
            .find(|(p, _)| p.id == playlist_id)
            .expect("append to unknown playlist");
        tracks.extend(uris.iter().cloned());
        Ok(())
    }

    async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .playlists
            .retain(|(p, _)| p.id != playlist_id);
        Ok(())
    }
}
