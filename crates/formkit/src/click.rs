//! Submit element resolution
//!
//! A browser submission is usually triggered by clicking a submit button.
//! The clicked element adds its own name/value pair to the form data and may
//! override the form's action, method and enctype.

use crate::collect::{submit_elements, FieldPair};
use crate::element::FormElement;
use crate::error::FormError;
use tracing::debug;

/// Which submit element, if any, is considered clicked
#[derive(Debug, Clone, PartialEq)]
pub enum Click<E> {
    /// Click the first submit element, or none if the form has none
    Default,
    /// Click the first submit element, failing if the form has none
    Required,
    /// Do not click anything, as when submitting with the Enter key
    Disabled,
    /// Click this element, which must belong to the form
    Element(E),
}

impl<E> Default for Click<E> {
    fn default() -> Self {
        Click::Default
    }
}

impl<E> From<E> for Click<E> {
    fn from(element: E) -> Self {
        Click::Element(element)
    }
}

/// Find the element to click on `form`
pub fn click_element<E: FormElement>(form: &E, click: &Click<E>) -> Result<Option<E>, FormError> {
    let element = match click {
        Click::Disabled => None,
        Click::Default => submit_elements(form).into_iter().next(),
        Click::Required => Some(
            submit_elements(form)
                .into_iter()
                .next()
                .ok_or(FormError::NoSubmitElement)?,
        ),
        Click::Element(element) => {
            check_owner(form, element)?;
            Some(element.clone())
        }
    };

    if let Some(ref element) = element {
        debug!(
            tag = element.tag_name(),
            name = element.attr("name").unwrap_or_default(),
            "Clicking submit element"
        );
    }

    Ok(element)
}

/// Pair contributed by the clicked element, if it has a name
pub fn click_pair<E: FormElement>(element: &E) -> Option<FieldPair> {
    match element.attr("name") {
        Some(name) if !name.is_empty() => Some((
            name.to_string(),
            element.attr("value").unwrap_or_default().to_string(),
        )),
        _ => None,
    }
}

/// Input types that can be clicked without also being collected as fields
const CLICKABLE_INPUT_TYPES: &[&str] = &["submit", "image", "button", "reset"];

fn check_owner<E: FormElement>(form: &E, element: &E) -> Result<(), FormError> {
    let clickable = element.is("button")
        || (element.is("input")
            && CLICKABLE_INPUT_TYPES
                .iter()
                .any(|input_type| element.attr_is("type", input_type)));
    if !clickable {
        return Err(FormError::InvalidSubmitChoice(format!(
            "<{}> cannot submit a form",
            element.tag_name()
        )));
    }

    if element.ancestor("form").as_ref() != Some(form) {
        return Err(FormError::InvalidSubmitChoice(
            "element does not belong to the submitted form".to_string(),
        ));
    }

    Ok(())
}
