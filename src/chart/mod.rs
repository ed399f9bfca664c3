//! # Chart Module
//!
//! Scrapes the Billboard Hot 100 page of one date and turns it into an
//! ordered list of song titles.
//!
//! - [`fetch`] - downloads the chart page and parses it into an HTML document
//! - [`extract_titles`] - pulls the ranked titles out of a parsed document
//!
//! The page markup is not under our control. Every chart row lives in a
//! `div.o-chart-results-list-row-container` and carries its title in an
//! `h3#title-of-a-story`; when Billboard changes that markup the extractor
//! finds fewer rows and says so instead of failing outright, unless
//! [`ExtractMode::Strict`](crate::config::ExtractMode::Strict) is requested.

mod extract;
mod fetch;

use thiserror::Error;

pub use extract::{ROW_SELECTOR, TITLE_SELECTOR, extract_titles};
pub use fetch::{chart_url, fetch, fetch_page};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Chart row {rank} has no title")]
    MissingTitle { rank: usize },

    #[error("Expected {expected} chart titles but found {found}")]
    UnexpectedCount { expected: usize, found: usize },
}
