//! `scraper` adapter
//!
//! Parses HTML with `scraper` and exposes its elements through
//! [`FormElement`], so forms found in a document can be submitted directly.

use crate::element::FormElement;
use crate::error::FormError;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use url::Url;

/// Parsed HTML document with the URL it was loaded from
pub struct HtmlDocument {
    html: Html,
    url: Option<Url>,
}

impl HtmlDocument {
    /// Parse an HTML document
    ///
    /// `url` is the address the document was loaded from. Relative form
    /// actions are resolved against it, or against the document's
    /// `<base href>` when there is one.
    pub fn parse(html: &str, url: Option<Url>) -> Self {
        let html = Html::parse_document(html);
        let url = document_base_url(&html, url);
        Self { html, url }
    }

    /// Base URL of the document
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// The `<html>` element
    pub fn root(&self) -> HtmlElement<'_> {
        self.wrap(self.html.root_element())
    }

    /// All elements matching a CSS selector, in document order
    pub fn select(&self, css: &str) -> Result<Vec<HtmlElement<'_>>, FormError> {
        let selector = parse_selector(css)?;
        Ok(self
            .html
            .select(&selector)
            .map(|element| self.wrap(element))
            .collect())
    }

    /// All `<form>` elements, in document order
    pub fn forms(&self) -> Vec<HtmlElement<'_>> {
        self.root()
            .descendants()
            .into_iter()
            .filter(|element| element.is("form"))
            .collect()
    }

    /// Form matched by a CSS selector
    ///
    /// The selector may point at the form itself or at any element inside
    /// it. Only the first match is considered.
    pub fn form(&self, css: &str) -> Result<Option<HtmlElement<'_>>, FormError> {
        let first = self.select(css)?.into_iter().next();
        Ok(first.and_then(|element| {
            if element.is("form") {
                Some(element)
            } else {
                element.ancestor("form")
            }
        }))
    }

    fn wrap<'a>(&'a self, element: ElementRef<'a>) -> HtmlElement<'a> {
        HtmlElement {
            element,
            base_url: self.url.as_ref(),
        }
    }
}

impl fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

/// Element of an [`HtmlDocument`]
#[derive(Clone, Copy)]
pub struct HtmlElement<'a> {
    element: ElementRef<'a>,
    base_url: Option<&'a Url>,
}

impl<'a> HtmlElement<'a> {
    /// Underlying `scraper` element
    pub fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    /// Descendants matching a CSS selector, in document order
    pub fn select(&self, css: &str) -> Result<Vec<HtmlElement<'a>>, FormError> {
        let selector = parse_selector(css)?;
        let base_url = self.base_url;
        Ok(self
            .element
            .select(&selector)
            .filter(|element| *element != self.element)
            .map(|element| HtmlElement { element, base_url })
            .collect())
    }

    /// Serialized HTML of the element
    pub fn html(&self) -> String {
        self.element.html()
    }
}

impl PartialEq for HtmlElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl fmt::Debug for HtmlElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlElement")
            .field("tag", &self.tag_name())
            .field("name", &self.attr("name"))
            .finish()
    }
}

impl<'a> FormElement for HtmlElement<'a> {
    fn tag_name(&self) -> &str {
        self.element.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    fn descendants(&self) -> Vec<Self> {
        let base_url = self.base_url;
        self.element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(|element| HtmlElement { element, base_url })
            .collect()
    }

    fn ancestor(&self, tag: &str) -> Option<Self> {
        let base_url = self.base_url;
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name().eq_ignore_ascii_case(tag))
            .map(|element| HtmlElement { element, base_url })
    }

    fn text_content(&self) -> String {
        self.element.text().collect()
    }

    fn base_url(&self) -> Option<&Url> {
        self.base_url
    }
}

fn parse_selector(css: &str) -> Result<Selector, FormError> {
    Selector::parse(css).map_err(|e| FormError::InvalidSelector(format!("{css}: {e}")))
}

/// Document URL, adjusted by the first `<base href>` if present
fn document_base_url(html: &Html, url: Option<Url>) -> Option<Url> {
    let Ok(selector) = Selector::parse("base[href]") else {
        return url;
    };
    let Some(href) = html
        .select(&selector)
        .next()
        .and_then(|base| base.value().attr("href"))
    else {
        return url;
    };

    let href = href.trim_matches(|c: char| c.is_ascii_whitespace());
    let resolved = match &url {
        Some(url) => url.join(href),
        None => Url::parse(href),
    };
    match resolved {
        Ok(base) => Some(base),
        Err(e) => {
            tracing::debug!(href, error = %e, "Ignoring unusable <base href>");
            url
        }
    }
}
