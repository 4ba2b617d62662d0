//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here, layered bottom-up:
//!
//! ```text
//! MonthBucketSync (crate::sync)
//!          ↓
//! library   - Library trait, RemoteLibraryClient (typed endpoints)
//!          ↓
//! paging    - PagedFetcher ({items, next} listings)
//!          ↓
//! transport - Transport trait, HttpTransport (reqwest + bearer token)
//!          ↓
//! auth      - AuthSession (fresh tokens), SpotifyTokenProvider
//! ```
//!
//! ## Endpoints
//!
//! - `GET /me` - current user id, owner of created playlists
//! - `GET /me/tracks` - saved tracks, newest first, paginated
//! - `GET /me/playlists` - the user's playlists, paginated
//! - `GET /playlists/{id}` - a playlist plus the first page of its items
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{id}/tracks` - append items, at most 100 per request
//! - `DELETE /playlists/{id}/followers` - unfollow (delete) a playlist
//! - `POST /api/token` - code exchange and refresh on the accounts host
//!
//! ## Errors
//!
//! Any non-2xx answer becomes [`crate::Error::Remote`] and a body that does
//! not fit the expected shape becomes [`crate::Error::Decode`]. Nothing is
//! retried; the caller aborts the run.

pub mod auth;
pub mod library;
pub mod paging;
pub mod transport;

pub use auth::{AuthSession, SpotifyTokenProvider, TokenProvider, authorize_url};
pub use library::{Library, RemoteLibraryClient};
pub use paging::PagedFetcher;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
