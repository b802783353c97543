use reqwest::Url;

use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// Derives the day page and input page URLs from a base authority.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base)
            .map_err(|e| FetchError::Config(format!("base url `{base}`: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::Config(format!(
                "base url `{base}` cannot carry a path"
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn day_page(&self, year: u32, day: u32) -> Url {
        self.with_segments(&[year.to_string(), "day".into(), day.to_string()])
    }

    pub fn input_page(&self, year: u32, day: u32) -> Url {
        self.with_segments(&[
            year.to_string(),
            "day".into(),
            day.to_string(),
            "input".into(),
        ])
    }

    fn with_segments(&self, segments: &[String]) -> Url {
        let mut url = self.base.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
