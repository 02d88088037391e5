/// Phase definitions for a scrape run and for the failures it records
use serde::Serialize;
use std::fmt;

/// Where a scrape run currently is
///
/// Runs only ever move forward:
/// `ConfigLoaded -> ListingDiscovery -> DetailExtraction -> Done`.
/// Failures inside a phase never move the run backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CrawlPhase {
    /// Configuration validated, nothing fetched yet
    ConfigLoaded,

    /// Fetching listing pages and filling the frontier
    ListingDiscovery,

    /// Fetching detail pages and extracting products
    DetailExtraction,

    /// Result assembled
    Done,
}

impl CrawlPhase {
    /// The phase that follows this one, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::ConfigLoaded => Some(Self::ListingDiscovery),
            Self::ListingDiscovery => Some(Self::DetailExtraction),
            Self::DetailExtraction => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Returns true if moving to `to` is a legal single step
    pub fn can_transition_to(&self, to: Self) -> bool {
        self.next() == Some(to)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigLoaded => "config_loaded",
            Self::ListingDiscovery => "listing_discovery",
            Self::DetailExtraction => "detail_extraction",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The crawl phase a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPhase {
    /// A listing page could not be fetched
    Listing,

    /// A product detail page could not be fetched or extracted
    Product,
}

impl ErrorPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
