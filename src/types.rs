use std::collections::HashSet;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Seconds before the recorded expiry at which a credential counts as stale.
pub const EXPIRY_MARGIN_SECS: i64 = 240;

/// A persisted OAuth credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub refresh_token: String,
    pub expiry: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Credential {
    /// Builds a credential from a token endpoint response received at `now`.
    ///
    /// Refresh responses may omit `refresh_token`; `previous_refresh` is kept
    /// in that case. A response with neither is unusable.
    pub fn from_response(
        response: TokenResponse,
        previous_refresh: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let refresh_token = response
            .refresh_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous_refresh.map(str::to_string))?;

        Some(Self {
            access_token: response.access_token,
            token_type: response.token_type.unwrap_or_else(default_token_type),
            refresh_token,
            expiry: now + Duration::seconds(response.expires_in),
            scope: response.scope,
        })
    }

    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry - Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub scope: Option<String>,
}

/// One page of a paginated listing.
///
/// `next` has to be present in the payload. `null` ends the listing, a
/// missing key is a response we do not understand.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRef {
    pub uri: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTrack {
    pub added_at: DateTime<FixedOffset>,
    pub track: TrackRef,
}

/// An entry of a playlist's track listing. `track` is null for items the
/// service can no longer resolve.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    pub tracks: Page<PlaylistItem>,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub track_uris: HashSet<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylist {
    pub name: String,
    pub public: bool,
    pub collaborative: bool,
    pub description: String,
}

impl NewPlaylist {
    /// A public, non-collaborative playlist without description.
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public: true,
            collaborative: false,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest<'a> {
    pub uris: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistResolution {
    Existing,
    Created,
    /// Dry runs only: the playlist would have been created.
    Missing,
}

/// What a run did (or would do) for one month.
#[derive(Debug, Clone)]
pub struct MonthOutcome {
    pub label: String,
    pub playlist_id: Option<String>,
    pub resolution: PlaylistResolution,
    pub pending: usize,
    pub added: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub months: Vec<MonthOutcome>,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn total_added(&self) -> usize {
        self.months.iter().map(|m| m.added.len()).sum()
    }

    pub fn created(&self) -> usize {
        self.months
            .iter()
            .filter(|m| m.resolution == PlaylistResolution::Created)
            .count()
    }

    pub fn month(&self, label: &str) -> Option<&MonthOutcome> {
        self.months.iter().find(|m| m.label == label)
    }
}

#[derive(Tabled)]
pub struct MonthTableRow {
    pub month: String,
    pub playlist: String,
    pub saved: usize,
    pub added: usize,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub id: String,
}
