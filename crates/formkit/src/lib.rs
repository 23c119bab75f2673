//! FormKit - turn HTML forms into HTTP requests
//!
//! This crate builds the request a browser would send when an HTML form is
//! submitted: target URL, method, headers and body. It does no networking;
//! the resulting [`Request`] can be converted into a `reqwest`, `http` or
//! crawler request.
//!
//! ## Submitting a form
//!
//! ```
//! use formkit::{form_to_request_with_options, HtmlDocument, SubmitOptions};
//! use url::Url;
//!
//! let doc = HtmlDocument::parse(
//!     r#"<form action="/search"><input name="q"><input type="submit" name="go" value="Go"></form>"#,
//!     Some(Url::parse("https://example.com/").unwrap()),
//! );
//! let form = doc.form("form").unwrap().unwrap();
//!
//! let options = SubmitOptions::new().data([("q", "rust")]);
//! let request = form_to_request_with_options(&form, &options).unwrap();
//! assert_eq!(request.url.as_str(), "https://example.com/search?q=rust&go=Go");
//! ```
//!
//! ## Pipeline
//!
//! - [`collect`] gathers the values of the form's successful controls
//! - [`FormData`] applies caller overrides on top of them
//! - [`Click`] selects the submit element whose value is appended last
//! - [`form_to_request_with_options`] resolves action, method and enctype
//!   and encodes the result
//!
//! Forms come from any HTML tree that implements [`FormElement`]; a
//! `scraper` implementation is provided by [`HtmlDocument`].

pub mod click;
pub mod collect;
mod convert;
mod data;
mod element;
mod error;
mod html;
mod request;
mod submit;

pub use click::Click;
pub use collect::FieldPair;
pub use convert::CrawlRequest;
pub use data::{FormData, Value};
pub use element::FormElement;
pub use error::{FormError, MethodOrigin};
pub use html::{HtmlDocument, HtmlElement};
pub use request::{Enctype, Request, FORM_URLENCODED, MULTIPART_FORM_DATA, TEXT_PLAIN};
pub use submit::{form_to_request, form_to_request_with_options, SubmitOptions};
