//! Conversions to HTTP client request types
//!
//! Each conversion is a plain field mapping of [`Request`]. Client-specific
//! options (timeouts, extensions, crawl metadata) are set on the returned
//! value.

use crate::error::FormError;
use crate::request::Request;
use bytes::Bytes;
use http::Method;
use serde_json::{Map, Value};
use url::Url;

impl Request {
    /// Convert into a `reqwest` request builder for `client`
    ///
    /// Further options can be chained on the returned builder before it is
    /// sent.
    pub fn to_reqwest(&self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let mut builder = client.request(self.method.clone(), self.url.clone());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !self.body.is_empty() {
            builder = builder.body(self.body.clone());
        }
        builder
    }

    /// `http` request builder with method, URI and headers set
    pub fn to_http_builder(&self) -> http::request::Builder {
        let mut builder = http::Request::builder()
            .method(self.method.clone())
            .uri(self.url.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    /// Convert into an `http::Request` carrying the body
    pub fn to_http(&self) -> Result<http::Request<Bytes>, FormError> {
        self.to_http_builder()
            .body(self.body.clone())
            .map_err(FormError::InvalidRequest)
    }

    /// Convert into a crawler request that hands its response to `callback`
    pub fn to_crawl<C>(&self, callback: C) -> CrawlRequest<C> {
        CrawlRequest {
            url: self.url.clone(),
            method: self.method.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            callback,
            meta: Map::new(),
            priority: 0,
            dont_filter: false,
        }
    }
}

/// Request scheduled by a crawler
///
/// Carries the callback that processes the response, along with crawl
/// metadata that travels with the request and is not sent over the wire.
#[derive(Debug, Clone)]
pub struct CrawlRequest<C> {
    pub url: Url,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    /// Response handler
    pub callback: C,
    /// Arbitrary metadata passed along to the callback
    pub meta: Map<String, Value>,
    /// Scheduling priority, higher runs first
    pub priority: i32,
    /// Skip duplicate filtering for this request
    pub dont_filter: bool,
}

impl<C> CrawlRequest<C> {
    /// Attach a metadata entry
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Set the scheduling priority
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Bypass duplicate filtering
    pub fn dont_filter(mut self, dont_filter: bool) -> Self {
        self.dont_filter = dont_filter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FORM_URLENCODED;
    use http::header::CONTENT_TYPE;

    fn get_request() -> Request {
        Request {
            url: Url::parse("https://example.com?foo=bar").unwrap(),
            method: Method::GET,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    fn post_request() -> Request {
        Request {
            url: Url::parse("https://example.com").unwrap(),
            method: Method::POST,
            headers: vec![("Content-Type".to_string(), FORM_URLENCODED.to_string())],
            body: Bytes::from_static(b"foo=bar"),
        }
    }

    #[test]
    fn test_to_http_get() {
        let request = get_request().to_http().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri(), "https://example.com/?foo=bar");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_to_http_post() {
        let request = post_request().to_http().unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri(), "https://example.com/");
        assert_eq!(request.headers()[CONTENT_TYPE], FORM_URLENCODED);
        assert_eq!(request.body(), &Bytes::from_static(b"foo=bar"));
    }

    #[test]
    fn test_to_http_builder_accepts_extra_options() {
        let request = post_request()
            .to_http_builder()
            .version(http::Version::HTTP_2)
            .body(())
            .unwrap();
        assert_eq!(request.version(), http::Version::HTTP_2);
        assert_eq!(request.method(), Method::POST);
    }

    #[test]
    fn test_to_http_invalid_header() {
        let mut request = post_request();
        request.headers.push(("bad header".to_string(), "x".to_string()));
        assert!(matches!(request.to_http(), Err(FormError::InvalidRequest(_))));
    }

    #[test]
    fn test_to_reqwest() {
        let client = reqwest::Client::new();

        let request = get_request().to_reqwest(&client).build().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "https://example.com/?foo=bar");
        assert!(request.body().is_none());

        let request = post_request()
            .to_reqwest(&client)
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.headers()[CONTENT_TYPE], FORM_URLENCODED);
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(&b"foo=bar"[..])
        );
        assert_eq!(request.timeout(), Some(&std::time::Duration::from_secs(5)));
    }

    #[test]
    fn test_to_crawl() {
        fn parse(_body: &[u8]) {}

        let request = post_request()
            .to_crawl(parse as fn(&[u8]))
            .meta("depth", 2)
            .priority(10)
            .dont_filter(true);
        assert_eq!(request.url.as_str(), "https://example.com/");
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Bytes::from_static(b"foo=bar"));
        assert_eq!(request.meta["depth"], 2);
        assert_eq!(request.priority, 10);
        assert!(request.dont_filter);

        let request = get_request().to_crawl(());
        assert!(request.meta.is_empty());
        assert_eq!(request.priority, 0);
        assert!(!request.dont_filter);
    }
}
