use scraper::{Html, Selector};

use crate::{
    chart::ChartError,
    config::{ChartConfig, ExtractMode},
    types::ChartEntry,
    warning,
};

pub const ROW_SELECTOR: &str = "div.o-chart-results-list-row-container";
pub const TITLE_SELECTOR: &str = "h3#title-of-a-story";

// a count further than this from the expected one is worth a warning
const COUNT_TOLERANCE: usize = 10;

/// Extracts the ranked song titles from a chart document.
///
/// Rows are returned in document order, which is the chart order, with
/// ranks starting at 1. Each title is the trimmed text of the first title
/// node inside its row.
///
/// # Errors
///
/// - [`ChartError::MissingTitle`] when a row has no title node at all
///
/// A row whose title node is blank is skipped with a warning; the remaining
/// rows keep their chart position as rank.
/// - [`ChartError::UnexpectedCount`] in strict mode when the number of rows
///   differs from `config.expected_titles`
pub fn extract_titles(
    document: &Html,
    config: &ChartConfig,
) -> Result<Vec<ChartEntry>, ChartError> {
    let row_selector = Selector::parse(ROW_SELECTOR).expect("row selector is valid CSS");
    let title_selector = Selector::parse(TITLE_SELECTOR).expect("title selector is valid CSS");

    let mut entries = Vec::new();
    for (index, row) in document.select(&row_selector).enumerate() {
        let rank = index + 1;
        let title = row
            .select(&title_selector)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
            .ok_or(ChartError::MissingTitle { rank })?;

        if title.is_empty() {
            warning!("Chart row {} has an empty title, skipping it", rank);
            continue;
        }

        entries.push(ChartEntry { rank, title });
    }

    check_count(entries.len(), config)?;
    Ok(entries)
}

fn check_count(found: usize, config: &ChartConfig) -> Result<(), ChartError> {
    let expected = config.expected_titles;
    match config.mode {
        ExtractMode::Strict if found != expected => {
            Err(ChartError::UnexpectedCount { expected, found })
        }
        ExtractMode::Lenient if found.abs_diff(expected) > COUNT_TOLERANCE => {
            warning!(
                "Found {} chart titles, expected {}. The chart page layout may have changed.",
                found,
                expected
            );
            Ok(())
        }
        _ => Ok(()),
    }
}
