//! Form submission
//!
//! Main entry points: [`form_to_request`] and
//! [`form_to_request_with_options`]. They resolve the clicked element, the
//! target URL, the method and the encoding, then merge and encode the form
//! data into a [`Request`].

use crate::click::{click_element, click_pair, Click};
use crate::collect::{collect_fields, FieldPair};
use crate::data::FormData;
use crate::element::FormElement;
use crate::error::{FormError, MethodOrigin};
use crate::request::{Enctype, Request, MULTIPART_FORM_DATA, TEXT_PLAIN};
use bytes::Bytes;
use http::Method;
use tracing::debug;
use url::form_urlencoded;
use url::Url;

/// Methods accepted as a method override
const OVERRIDE_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Submission options
///
/// Everything defaults to what a browser would do when the form's first
/// submit button is clicked without the user touching any field.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOptions<E> {
    /// Field values to set, add or remove
    pub data: FormData,
    /// Submit element to click
    pub click: Click<E>,
    /// Method to use instead of the form's
    pub method: Option<String>,
    /// Encoding to use instead of the form's
    pub enctype: Option<String>,
}

impl<E> Default for SubmitOptions<E> {
    fn default() -> Self {
        Self {
            data: FormData::default(),
            click: Click::Default,
            method: None,
            enctype: None,
        }
    }
}

impl<E> SubmitOptions<E> {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set field overrides
    pub fn data(mut self, data: impl Into<FormData>) -> Self {
        self.data = data.into();
        self
    }

    /// Set the submit element to click
    pub fn click(mut self, click: impl Into<Click<E>>) -> Self {
        self.click = click.into();
        self
    }

    /// Submit without clicking any element
    pub fn no_click(mut self) -> Self {
        self.click = Click::Disabled;
        self
    }

    /// Override the form method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Override the form enctype
    pub fn enctype(mut self, enctype: impl Into<String>) -> Self {
        self.enctype = Some(enctype.into());
        self
    }
}

/// Build the request a browser would send when submitting `form`
///
/// Clicks the first submit element, if any, and uses the form's own values.
/// For custom data or another button, use [`form_to_request_with_options`].
pub fn form_to_request<E: FormElement>(form: &E) -> Result<Request, FormError> {
    form_to_request_with_options(form, &SubmitOptions::default())
}

/// Build the request for submitting `form` with custom options
pub fn form_to_request_with_options<E: FormElement>(
    form: &E,
    options: &SubmitOptions<E>,
) -> Result<Request, FormError> {
    let clicked = click_element(form, &options.click)?;
    let url = action_url(form, clicked.as_ref())?;
    let method = resolve_method(form, clicked.as_ref(), options.method.as_deref())?;

    let mut pairs = options.data.merge(collect_fields(form));
    pairs.extend(clicked.as_ref().and_then(click_pair));

    let request = if method == Method::GET {
        encode_query(url, &pairs)
    } else {
        let enctype = resolve_enctype(form, clicked.as_ref(), options.enctype.as_deref())?;
        debug!(%enctype, "Encoding form body");
        encode_body(url, method, enctype, &pairs)
    };

    debug!(
        method = %request.method,
        url = %request.url,
        fields = pairs.len(),
        "Built form request"
    );
    Ok(request)
}

/// Absolute URL the form submits to, before any query is added
fn action_url<E: FormElement>(form: &E, clicked: Option<&E>) -> Result<Url, FormError> {
    let base = form.base_url().ok_or(FormError::MissingBaseUrl)?;

    let action = clicked
        .and_then(|element| element.attr("formaction"))
        .filter(|action| !action.is_empty())
        .or_else(|| form.attr("action"));

    match action {
        None => Ok(base.clone()),
        Some(action) => {
            let action = strip_whitespace(action);
            base.join(action).map_err(|source| FormError::InvalidUrl {
                action: action.to_string(),
                source,
            })
        }
    }
}

fn resolve_method<E: FormElement>(
    form: &E,
    clicked: Option<&E>,
    method: Option<&str>,
) -> Result<Method, FormError> {
    if let Some(method) = method.filter(|m| !m.is_empty()) {
        let upper = method.to_ascii_uppercase();
        if !OVERRIDE_METHODS.contains(&upper.as_str()) {
            return Err(FormError::InvalidMethod(method.to_string()));
        }
        return Method::from_bytes(upper.as_bytes())
            .map_err(|_| FormError::InvalidMethod(method.to_string()));
    }

    let (value, origin) = match clicked
        .and_then(|element| element.attr("formmethod"))
        .filter(|m| !m.is_empty())
    {
        Some(value) => (value, MethodOrigin::SubmitElement),
        None => (form.attr("method").unwrap_or_default(), MethodOrigin::Form),
    };

    match value.to_ascii_lowercase().as_str() {
        "post" => Ok(Method::POST),
        "get" | "" => Ok(Method::GET),
        "dialog" => Err(FormError::UnsupportedMethod {
            method: value.to_ascii_uppercase(),
            origin,
        }),
        _ => {
            debug!(method = value, %origin, "Unknown form method, falling back to GET");
            Ok(Method::GET)
        }
    }
}

fn resolve_enctype<E: FormElement>(
    form: &E,
    clicked: Option<&E>,
    enctype: Option<&str>,
) -> Result<Enctype, FormError> {
    if let Some(enctype) = enctype.filter(|e| !e.is_empty()) {
        if enctype.eq_ignore_ascii_case(MULTIPART_FORM_DATA) {
            return Err(FormError::UnsupportedEncoding {
                enctype: enctype.to_ascii_lowercase(),
            });
        }
        return enctype
            .parse()
            .map_err(|_| FormError::InvalidEnctype(enctype.to_string()));
    }

    let value = clicked
        .and_then(|element| element.attr("formenctype"))
        .filter(|e| !e.is_empty())
        .or_else(|| form.attr("enctype"))
        .unwrap_or_default()
        .to_ascii_lowercase();

    match value.as_str() {
        MULTIPART_FORM_DATA => Err(FormError::UnsupportedEncoding {
            enctype: MULTIPART_FORM_DATA.to_string(),
        }),
        TEXT_PLAIN => Ok(Enctype::TextPlain),
        _ => Ok(Enctype::UrlEncoded),
    }
}

fn encode_query(mut url: Url, pairs: &[FieldPair]) -> Request {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&urlencode(pairs)));
    }

    Request {
        url,
        method: Method::GET,
        headers: Vec::new(),
        body: Bytes::new(),
    }
}

fn encode_body(url: Url, method: Method, enctype: Enctype, pairs: &[FieldPair]) -> Request {
    let body = match enctype {
        Enctype::UrlEncoded => urlencode(pairs),
        Enctype::TextPlain => pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    Request {
        url,
        method,
        headers: vec![("Content-Type".to_string(), enctype.as_str().to_string())],
        body: Bytes::from(body),
    }
}

fn urlencode(pairs: &[FieldPair]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Strip leading and trailing HTML whitespace
fn strip_whitespace(value: &str) -> &str {
    value.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c'))
}
