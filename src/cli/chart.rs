use std::{io, time::Duration};

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    chart,
    config::{ChartConfig, Config, ExtractMode},
    error, info, spotify, success,
    types::ChartEntry,
    utils,
};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub date: Option<String>,
    pub strict: bool,
    pub titles_only: bool,
}

pub async fn run(opts: RunOptions) {
    let input = match opts.date {
        Some(date) => date.trim().to_string(),
        None => match utils::prompt_date(&mut io::stdin().lock()) {
            Ok(date) => date,
            Err(e) => error!("Cannot read date from stdin: {}", e),
        },
    };

    let mode = if opts.strict {
        ExtractMode::Strict
    } else {
        ExtractMode::Lenient
    };
    let chart_config = ChartConfig::from_env().with_mode(mode);

    let date = match utils::validate_date(&input, &chart_config) {
        Ok(date) => date,
        Err(e) => error!("{}", e),
    };

    let config = if opts.titles_only {
        None
    } else {
        match Config::from_env() {
            Ok(config) => Some(config),
            Err(e) => error!("{}", e),
        }
    };

    let entries = fetch_titles(&chart_config, date).await;
    success!("Found {} titles on the chart of {}", entries.len(), input);

    let Some(config) = config else {
        println!("{}", Table::new(utils::chart_table_rows(&entries)));
        return;
    };

    let token = match spotify::auth::access_token(&config).await {
        Ok(token) => token,
        Err(e) => error!("Authorization failed: {}", e),
    };

    info!("Searching Spotify for {} titles", entries.len());
    let matches = match spotify::search::match_titles(&config, &token, &entries).await {
        Ok(matches) => matches,
        Err(e) => error!("Track search failed: {}", e),
    };
    success!("Matched {} of {} titles", matches.len(), entries.len());

    if !matches.is_empty() {
        println!("{}", Table::new(utils::match_table_rows(&matches)));
    }

    match spotify::playlist::publish(&config, &token, date, &matches).await {
        Ok(Some(playlist)) => success!(
            "Playlist \"{}\" created with {} tracks ({})",
            playlist.name,
            matches.len(),
            playlist.uri
        ),
        Ok(None) => {}
        Err(e) => error!("Failed to publish playlist: {}", e),
    }
}

async fn fetch_titles(chart_config: &ChartConfig, date: NaiveDate) -> Vec<ChartEntry> {
    info!(
        "Fetching Billboard Hot 100 from {}",
        chart::chart_url(chart_config, date)
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("Downloading chart...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let document = chart::fetch(chart_config, date).await;
    pb.finish_and_clear();

    let document = match document {
        Ok(document) => document,
        Err(e) => error!("{}", e),
    };

    match chart::extract_titles(&document, chart_config) {
        Ok(entries) => entries,
        Err(e) => error!("{}", e),
    }
}
