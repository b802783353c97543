use derive_builder::Builder;
use reqwest::{cookie::Jar, Client, Response, Url};
use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, warn};

use crate::{
    classify::{classify, Endpoint, Outcome},
    endpoint::{Endpoints, DEFAULT_BASE_URL},
    error::FetchError,
    extract::{DayRecord, Extractor, HtmlDocument},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const SESSION_COOKIE: &str = "session";
pub const DAY_PAGE_PHASE: &str = "parse day data response";
pub const INPUT_PAGE_PHASE: &str = "read problem input";

#[derive(Clone, Builder)]
#[builder(setter(into))]
pub struct FetchConfig {
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Session token; empty means anonymous requests.
    #[builder(default)]
    session: String,
    #[builder(default = "DEFAULT_TIMEOUT")]
    timeout: Duration,
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("base_url", &self.base_url)
            .field("session", &if self.session.is_empty() { "" } else { "<redacted>" })
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fetches puzzle pages with a fixed session cookie. No retries: every
/// transport error or timeout is returned to the caller as is.
#[derive(Debug, Clone)]
pub struct AocClient {
    http: Client,
    endpoints: Endpoints,
    extractor: Extractor,
}

impl AocClient {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let endpoints = Endpoints::new(&config.base_url)?;

        let jar = Jar::default();
        if !config.session.is_empty() {
            check_session(&config.session)?;
            jar.add_cookie_str(
                &format!("{SESSION_COOKIE}={}; Path=/", config.session),
                endpoints.base(),
            );
        }

        let http = Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Config(format!("http client: {e}")))?;

        Ok(Self {
            http,
            endpoints,
            extractor: Extractor::new()?,
        })
    }

    /// Fetches the day page then the input page and assembles the record.
    ///
    /// A 400 from the input page means the session is missing or expired: a
    /// warning is logged and `problem_input` stays empty.
    pub async fn fetch_day(&self, year: u32, day: u32) -> Result<DayRecord, FetchError> {
        let response = self
            .get(Endpoint::DayPage, self.endpoints.day_page(year, day))
            .await?;
        match classify(Endpoint::DayPage, response.status().as_u16()) {
            Outcome::Proceed => {}
            Outcome::SessionRejected | Outcome::Unexpected(_) => {
                return Err(FetchError::Status {
                    endpoint: Endpoint::DayPage,
                    status: response.status().as_u16(),
                })
            }
        }
        let body = read_body(response, DAY_PAGE_PHASE).await?;
        let mut record = self.extractor.day_page(&HtmlDocument::parse(&body))?;

        let response = self
            .get(Endpoint::InputPage, self.endpoints.input_page(year, day))
            .await?;
        match classify(Endpoint::InputPage, response.status().as_u16()) {
            Outcome::Proceed => {
                let body = read_body(response, INPUT_PAGE_PHASE).await?;
                record.problem_input = self.extractor.input_page(&HtmlDocument::parse(&body));
            }
            Outcome::SessionRejected => {
                warn!(
                    status = response.status().as_u16(),
                    "{}: empty or expired session",
                    Endpoint::InputPage
                );
            }
            Outcome::Unexpected(status) => {
                return Err(FetchError::Status {
                    endpoint: Endpoint::InputPage,
                    status,
                })
            }
        }

        Ok(record)
    }

    async fn get(&self, endpoint: Endpoint, url: Url) -> Result<Response, FetchError> {
        debug!(%url, "{endpoint}");
        self.http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })
    }
}

/// Rejects tokens that are not a valid cookie value, which the jar would
/// otherwise truncate, reinterpret as attributes or drop silently.
fn check_session(session: &str) -> Result<(), FetchError> {
    let valid = session.bytes().all(|b| {
        matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
    });
    if valid {
        Ok(())
    } else {
        Err(FetchError::Config(
            "session contains characters not allowed in a cookie value".to_string(),
        ))
    }
}

async fn read_body(response: Response, phase: &'static str) -> Result<String, FetchError> {
    response
        .text()
        .await
        .map_err(|source| FetchError::Body { phase, source })
}
