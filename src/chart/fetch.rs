use chrono::NaiveDate;
use reqwest::Client;
use scraper::Html;

use crate::{
    chart::ChartError,
    config::{ChartConfig, DATE_FORMAT},
    warning,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Address of the chart page for `date`, e.g.
/// `https://www.billboard.com/charts/hot-100/2023-07-15/`.
///
/// Taking a [`NaiveDate`] means only a date that went through
/// [`validate_date`](crate::utils::validate_date) can reach the network.
pub fn chart_url(config: &ChartConfig, date: NaiveDate) -> String {
    format!(
        "{base}{date}/",
        base = config.base_url,
        date = date.format(DATE_FORMAT)
    )
}

/// Downloads the raw chart page for `date`.
///
/// One GET without retry or timeout. Transport failures are returned to the
/// caller. A non-success status only produces a warning because the body is
/// still handed to the extractor, whose count check reports an empty page.
pub async fn fetch_page(config: &ChartConfig, date: NaiveDate) -> Result<String, ChartError> {
    let url = chart_url(config, date);
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        warning!("Chart page {} answered with {}", url, response.status());
    }

    Ok(response.text().await?)
}

/// Downloads the chart page for `date` and parses it.
pub async fn fetch(config: &ChartConfig, date: NaiveDate) -> Result<Html, ChartError> {
    let body = fetch_page(config, date).await?;
    Ok(Html::parse_document(&body))
}
