use strum::Display;

/// The two pages fetched for a puzzle day. `Display` yields the operation name
/// used to annotate errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Endpoint {
    #[strum(serialize = "request for day data")]
    DayPage,
    #[strum(serialize = "request for day problem input")]
    InputPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Proceed,
    /// Input page answered 400: the session is missing or expired.
    SessionRejected,
    Unexpected(u16),
}

pub fn classify(endpoint: Endpoint, status: u16) -> Outcome {
    match (endpoint, status) {
        (_, 200) => Outcome::Proceed,
        (Endpoint::InputPage, 400) => Outcome::SessionRejected,
        (_, status) => Outcome::Unexpected(status),
    }
}
