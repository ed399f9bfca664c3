//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API the chart playlist
//! needs. Every function takes the [`Config`](crate::config::Config) holding
//! endpoints and credentials plus, where the call is authenticated, a bearer
//! access token.
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow with PKCE, code exchange
//!   and token refresh
//! - [`search`] - track lookup by title, one request per title
//! - [`playlist`] - playlist creation and batch item addition
//!
//! ## API Coverage
//!
//! - `GET /search` - track search by free-text query
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add items to a playlist
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Error Handling
//!
//! Calls return `reqwest::Error` for transport failures and non-success
//! statuses alike. Nothing is retried; the caller decides whether a failure
//! ends the run. A search without results is not an error and comes back
//! as `Ok(None)`.
//!
//! ## Usage
//!
//! ```rust
//! let token = spotify::auth::access_token(&config).await?;
//! let matches = spotify::search::match_titles(&config, &token, &entries).await?;
//! spotify::playlist::publish(&config, &token, date, &matches).await?;
//! ```

pub mod auth;
pub mod playlist;
pub mod search;
