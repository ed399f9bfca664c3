use std::io::{self, BufRead, Write};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Datelike, Local, NaiveDate};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{
    config::{ChartConfig, DATE_FORMAT},
    types::{ChartEntry, ChartTableRow, MatchTableRow, TrackMatch},
};

pub const DATE_PROMPT: &str =
    "Which year do you want to travel to? Type the date in this format YYYY-MM-DD:";

/// Reasons a requested chart date is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Your entered date: {0} is in the wrong format! Please try again!")]
    WrongFormat(String),
    #[error("Your entered date: {0} is invalid and cannot exist! Please try again!")]
    Impossible(String),
    #[error("Your entered date: {0} cannot exist in the future! Please try again!")]
    Future(String),
}

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Validates a chart date against today's local date.
pub fn validate_date(input: &str, config: &ChartConfig) -> Result<NaiveDate, DateError> {
    validate_date_at(input, &config.date_pattern, Local::now().date_naive())
}

/// Validates a chart date against an explicit `today`.
///
/// The checks run in order and the first failing one decides the error:
/// the fixed-width `YYYY-MM-DD` shape, a real calendar date, and a date
/// that is not after `today`.
pub fn validate_date_at(
    input: &str,
    pattern: &Regex,
    today: NaiveDate,
) -> Result<NaiveDate, DateError> {
    if !pattern.is_match(input) {
        return Err(DateError::WrongFormat(input.to_string()));
    }

    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| DateError::Impossible(input.to_string()))?;

    // year 0000 passes the pattern but is not a calendar year
    if date.year() < 1 {
        return Err(DateError::Impossible(input.to_string()));
    }

    if date > today {
        return Err(DateError::Future(input.to_string()));
    }

    Ok(date)
}

/// Asks for the chart date on stdout and reads one line from `reader`.
pub fn prompt_date<R: BufRead>(reader: &mut R) -> io::Result<String> {
    print!("{} ", DATE_PROMPT);
    io::stdout().flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn playlist_name(date: NaiveDate) -> String {
    format!("{} Billboard 100", date.format(DATE_FORMAT))
}

pub fn chart_table_rows(entries: &[ChartEntry]) -> Vec<ChartTableRow> {
    entries
        .iter()
        .map(|e| ChartTableRow {
            rank: e.rank,
            title: e.title.clone(),
        })
        .collect()
}

pub fn match_table_rows(matches: &[TrackMatch]) -> Vec<MatchTableRow> {
    matches
        .iter()
        .map(|m| MatchTableRow {
            rank: m.rank,
            title: m.title.clone(),
            track: m.name.clone(),
            artists: m.artists.join(", "),
        })
        .collect()
}
