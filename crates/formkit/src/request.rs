//! Request data produced by a form submission

use bytes::Bytes;
use http::Method;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// `Content-Type` of urlencoded form bodies
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// `Content-Type` of plain text form bodies
pub const TEXT_PLAIN: &str = "text/plain";

/// `Content-Type` of multipart form bodies, which FormKit cannot build
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Body encoding of a POST submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Enctype {
    /// `application/x-www-form-urlencoded`
    #[default]
    UrlEncoded,
    /// `text/plain`
    TextPlain,
}

impl Enctype {
    /// MIME type sent as `Content-Type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Enctype::UrlEncoded => FORM_URLENCODED,
            Enctype::TextPlain => TEXT_PLAIN,
        }
    }
}

impl FromStr for Enctype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            FORM_URLENCODED => Ok(Enctype::UrlEncoded),
            TEXT_PLAIN => Ok(Enctype::TextPlain),
            _ => Err(format!("Unsupported enctype: {s}")),
        }
    }
}

impl fmt::Display for Enctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP request equivalent to a form submission
///
/// Plain data: nothing is sent. Use one of the conversion methods
/// ([`Request::to_reqwest`], [`Request::to_http`], [`Request::to_crawl`]) to
/// hand it to an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Absolute target URL, with the form data as query for GET
    pub url: Url,
    /// Uppercase HTTP method
    pub method: Method,
    /// Headers in order, only `Content-Type` for bodies
    pub headers: Vec<(String, String)>,
    /// Encoded form data, empty for GET
    pub body: Bytes,
}

impl Request {
    /// Value of the first header with this name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
