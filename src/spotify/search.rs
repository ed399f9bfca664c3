use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::Config,
    types::{ChartEntry, SearchResponse, Track, TrackMatch},
    warning,
};

/// Looks up a single title in the track namespace.
///
/// Sends `GET {api}/search?q=track:{title}&type=track&limit=1` and returns
/// the first item, or `None` when the search came back empty.
///
/// # Errors
///
/// Transport failures and non-success statuses, including an invalid or
/// expired token, are returned as `reqwest::Error`.
///
/// # Example
///
/// ```
/// if let Some(track) = search_track(&config, &token, "Vampire").await? {
///     println!("{}", track.uri);
/// }
/// ```
pub async fn search_track(
    config: &Config,
    token: &str,
    title: &str,
) -> Result<Option<Track>, reqwest::Error> {
    let api_url = format!("{uri}/search", uri = config.api_url);
    let query = format!("track:{}", title);

    let response = Client::new()
        .get(&api_url)
        .bearer_auth(token)
        .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<SearchResponse>().await?;
    Ok(json.tracks.and_then(|t| t.items.into_iter().next()))
}

/// Matches every chart entry against the search API, one request at a time.
///
/// Titles without a search result are reported and skipped, so the result
/// holds only successful matches in chart order. Any request failure aborts
/// the whole matching pass.
pub async fn match_titles(
    config: &Config,
    token: &str,
    entries: &[ChartEntry],
) -> Result<Vec<TrackMatch>, reqwest::Error> {
    let pb = ProgressBar::new(entries.len() as u64);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut matches = Vec::new();
    for entry in entries {
        pb.set_message(entry.title.clone());

        let track = match search_track(config, token, &entry.title).await {
            Ok(track) => track,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        match track {
            Some(track) => matches.push(TrackMatch {
                rank: entry.rank,
                title: entry.title.clone(),
                name: track.name,
                artists: track.artists.into_iter().map(|a| a.name).collect(),
                uri: track.uri,
            }),
            None => pb.suspend(|| {
                warning!("No URI results found in search for Track: {}", entry.title)
            }),
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(matches)
}
