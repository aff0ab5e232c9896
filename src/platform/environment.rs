//! Ambient facts a render pass may read: the client product, the debug flag
//! and the base URI that relative references resolve against.
//!
//! An [`Environment`] is passed explicitly to every depiction; depictors never
//! look these up elsewhere.

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// ClientProduct
// ---------------------------------------------------------------------------

/// Browser family of a web client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    InternetExplorer,
    Firefox,
    Chrome,
    Safari,
    Opera,
    Other,
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InternetExplorer => "internet-explorer",
            Self::Firefox => "firefox",
            Self::Chrome => "chrome",
            Self::Safari => "safari",
            Self::Opera => "opera",
            Self::Other => "other",
        })
    }
}

/// The product a client identifies as, with its major.minor version.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientProduct {
    pub brand: Brand,
    pub version: Option<f64>,
}

impl ClientProduct {
    pub fn new(brand: Brand, version: Option<f64>) -> Self {
        Self { brand, version }
    }

    /// Detect the product from an HTTP `User-Agent` value.
    ///
    /// Markers are checked from most to least specific, since Chrome and
    /// Opera also claim to be Safari.
    pub fn from_user_agent(user_agent: &str) -> Self {
        if let Some(version) = marker_version(user_agent, "MSIE ") {
            return Self::new(Brand::InternetExplorer, version);
        }
        if user_agent.contains("Trident/") {
            let version = marker_version(user_agent, "rv:").flatten();
            return Self::new(Brand::InternetExplorer, version);
        }
        if let Some(version) = marker_version(user_agent, "Firefox/") {
            return Self::new(Brand::Firefox, version);
        }
        if let Some(version) =
            marker_version(user_agent, "OPR/").or_else(|| marker_version(user_agent, "Opera/"))
        {
            return Self::new(Brand::Opera, version);
        }
        if let Some(version) = marker_version(user_agent, "Chrome/") {
            return Self::new(Brand::Chrome, version);
        }
        if user_agent.contains("Safari/") {
            let version = marker_version(user_agent, "Version/").flatten();
            return Self::new(Brand::Safari, version);
        }
        Self::new(Brand::Other, None)
    }

    pub fn is_brand(&self, brand: Brand) -> bool {
        self.brand == brand
    }

    /// `true` if this is `brand` with a known version below `version`.
    pub fn is_brand_less_than(&self, brand: Brand, version: f64) -> bool {
        self.brand == brand && self.version.is_some_and(|v| v < version)
    }
}

impl Default for ClientProduct {
    fn default() -> Self {
        Self::new(Brand::Other, None)
    }
}

/// `None` if the marker is absent; `Some(None)` if it has no readable version.
fn marker_version(user_agent: &str, marker: &str) -> Option<Option<f64>> {
    let start = user_agent.find(marker)? + marker.len();
    Some(leading_version(&user_agent[start..]))
}

/// The leading `major[.minor]` of a version string.
fn leading_version(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in text.char_indices() {
        if ch.is_ascii_digit() {
            end = i + 1;
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    text[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Facts shared by every depictor in a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    client: ClientProduct,
    base_uri: Url,
    debug: bool,
    depict_ids: bool,
}

impl Environment {
    pub fn new(base_uri: Url) -> Self {
        Self {
            client: ClientProduct::default(),
            base_uri,
            debug: false,
            depict_ids: true,
        }
    }

    pub fn parse(base_uri: &str) -> Result<Self> {
        let url = Url::parse(base_uri)
            .map_err(|err| Error::invalid_argument(format!("base uri {base_uri:?}: {err}")))?;
        Ok(Self::new(url))
    }

    pub fn with_client(mut self, client: ClientProduct) -> Self {
        self.client = client;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Whether depictors write component ids into their output.
    pub fn with_depict_ids(mut self, depict_ids: bool) -> Self {
        self.depict_ids = depict_ids;
        self
    }

    pub fn client(&self) -> &ClientProduct {
        &self.client
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn depict_ids(&self) -> bool {
        self.depict_ids
    }

    /// Resolve a reference against the base URI.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        self.base_uri
            .join(reference)
            .map(String::from)
            .map_err(|err| Error::invalid_argument(format!("reference {reference:?}: {err}")))
    }
}
