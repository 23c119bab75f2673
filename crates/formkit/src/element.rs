//! Read-only view of HTML elements
//!
//! FormKit never parses HTML itself. Any tree library can be plugged in by
//! implementing [`FormElement`] for its element handle; [`HtmlElement`]
//! (backed by `scraper`) is the built-in implementation.
//!
//! [`HtmlElement`]: crate::HtmlElement

use url::Url;

/// Capabilities FormKit needs from an element of a parsed HTML tree
///
/// Handles are expected to be cheap to clone. Equality must mean "same node
/// in the same tree", since it is used to check that a clicked element
/// belongs to the submitted form.
pub trait FormElement: Clone + PartialEq {
    /// Lowercase local tag name (`form`, `input`, ...)
    fn tag_name(&self) -> &str;

    /// Attribute value, or `None` when the attribute is not set
    fn attr(&self, name: &str) -> Option<&str>;

    /// Descendant elements in document order, excluding `self`
    fn descendants(&self) -> Vec<Self>;

    /// Nearest ancestor element with the given tag name
    fn ancestor(&self, tag: &str) -> Option<Self>;

    /// Concatenated text of all descendant text nodes
    fn text_content(&self) -> String;

    /// URL of the document the element belongs to
    fn base_url(&self) -> Option<&Url>;

    /// Returns true if the attribute is present, whatever its value
    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Returns true if the element has the given tag name
    fn is(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    /// Attribute value compared case-insensitively, `false` when absent
    fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attr(name)
            .is_some_and(|v| v.eq_ignore_ascii_case(value))
    }
}
