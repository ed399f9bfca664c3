//! # CLI Module
//!
//! User-facing commands. Each command loads what it needs, calls into the
//! [`crate::chart`] and [`crate::spotify`] layers, reports progress with
//! the crate's output macros and ends the process through [`crate::error!`]
//! on any failure it cannot continue from.
//!
//! - [`run`] - the chart-to-playlist pipeline: validate the date, fetch and
//!   extract the chart, match titles, publish the playlist
//! - [`auth`] - authorize against Spotify and cache the token
//!
//! ```bash
//! chartcli --date 2023-07-15        # build the playlist for a date
//! chartcli                          # same, asks for the date
//! chartcli --date 1999-12-31 --titles-only
//! chartcli auth
//! ```

mod auth;
mod chart;

pub use auth::auth;
pub use chart::{RunOptions, run};
