//! Roster sources.
//!
//! A roster is loaded exactly once at startup. Every failure (transport,
//! non-success status, unreadable file, malformed document) comes back as a
//! single `LoadError`; nothing here retries.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};
use url::Url;

use crate::error::{LoadError, LoadResult};
use crate::roster::Roster;

/// Something a roster can be loaded from
#[async_trait]
pub trait RosterLoader: Send + Sync {
    /// Human-readable origin, used in logs
    fn describe(&self) -> String;

    /// Load and normalise the roster
    async fn load(&self) -> LoadResult<Roster>;
}

/// The roster compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRoster;

#[async_trait]
impl RosterLoader for EmbeddedRoster {
    fn describe(&self) -> String {
        "embedded roster".to_string()
    }

    async fn load(&self) -> LoadResult<Roster> {
        Roster::embedded()
    }
}

/// A roster document on disk
#[derive(Debug, Clone)]
pub struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RosterLoader for FileRoster {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn load(&self) -> LoadResult<Roster> {
        let document = tokio::fs::read_to_string(&self.path).await?;
        Roster::from_json_str(&document)
    }
}

/// A roster document fetched over HTTP
#[derive(Debug, Clone)]
pub struct HttpRoster {
    url: Url,
    http: Client,
}

impl HttpRoster {
    pub fn new(url: Url) -> LoadResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|err| LoadError::Transport(err.to_string()))?;
        Ok(Self { url, http })
    }
}

#[async_trait]
impl RosterLoader for HttpRoster {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    async fn load(&self) -> LoadResult<Roster> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read body>".to_string());
            return Err(LoadError::HttpStatus { status, body });
        }

        let document = response
            .text()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;
        Roster::from_json_str(&document)
    }
}

/// Where the roster comes from, as named on the command line or in config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RosterSource {
    #[default]
    Embedded,
    File(PathBuf),
    Http(Url),
}

impl RosterSource {
    pub fn loader(&self) -> LoadResult<Box<dyn RosterLoader>> {
        Ok(match self {
            Self::Embedded => Box::new(EmbeddedRoster),
            Self::File(path) => Box::new(FileRoster::new(path.clone())),
            Self::Http(url) => Box::new(HttpRoster::new(url.clone())?),
        })
    }
}

impl FromStr for RosterSource {
    type Err = std::convert::Infallible;

    /// `embedded` (or blank) selects the compiled-in roster, an `http`/`https`
    /// URL selects a fetch, anything else is a file path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("embedded") {
            return Ok(Self::Embedded);
        }
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Http(url)),
            _ => Ok(Self::File(PathBuf::from(s))),
        }
    }
}

/// Load a roster from `source`, logging the outcome.
pub async fn load_roster(source: &RosterSource) -> LoadResult<Roster> {
    let loader = source.loader()?;
    let origin = loader.describe();
    match loader.load().await {
        Ok(roster) => {
            info!(origin = %origin, members = roster.len(), "Roster loaded");
            Ok(roster)
        }
        Err(err) => {
            error!(origin = %origin, error = %err, "Failed to load roster");
            Err(err)
        }
    }
}
