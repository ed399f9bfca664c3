use chrono::NaiveDate;
use reqwest::Client;

use crate::{
    config::Config,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, TrackMatch,
    },
    utils, warning,
};

pub const PLAYLIST_DESCRIPTION: &str = "Billboard Hot 100 time capsule, created by chartcli";

/// Creates a private, non-collaborative playlist owned by `config.user_id`.
///
/// Uses `POST {api}/users/{user_id}/playlists`.
pub async fn create(
    config: &Config,
    token: &str,
    name: String,
) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = config.api_url,
        user_id = config.user_id
    );

    let body = CreatePlaylistRequest {
        name,
        description: PLAYLIST_DESCRIPTION.to_string(),
        public: false,
        collaborative: false,
    };

    let response = Client::new()
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    response.json::<CreatePlaylistResponse>().await
}

/// Appends `uris` to a playlist in one request.
///
/// The list is sent as is. Spotify accepts up to 100 items per call, which
/// a single chart never exceeds.
pub async fn add_tracks(
    config: &Config,
    token: &str,
    playlist_id: &str,
    uris: Vec<String>,
) -> Result<AddTrackToPlaylistResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = config.api_url,
        id = playlist_id
    );

    let response = Client::new()
        .post(&api_url)
        .bearer_auth(token)
        .json(&AddTrackToPlaylistRequest { uris })
        .send()
        .await?
        .error_for_status()?;

    response.json::<AddTrackToPlaylistResponse>().await
}

/// Creates the `"{date} Billboard 100"` playlist and fills it with `matches`.
///
/// Returns `Ok(None)` without touching the API when nothing matched.
pub async fn publish(
    config: &Config,
    token: &str,
    date: NaiveDate,
    matches: &[TrackMatch],
) -> Result<Option<CreatePlaylistResponse>, reqwest::Error> {
    if matches.is_empty() {
        warning!("No tracks matched, skipping playlist creation");
        return Ok(None);
    }

    let playlist = create(config, token, utils::playlist_name(date)).await?;
    let uris = matches.iter().map(|m| m.uri.clone()).collect();
    add_tracks(config, token, &playlist.id, uris).await?;

    Ok(Some(playlist))
}
