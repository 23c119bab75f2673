//! Field collection
//!
//! Walks a form in document order and returns the name/value pairs of its
//! successful controls, the way a browser builds its form data set. Submit
//! elements are left out; the click resolver decides about those.

use crate::element::FormElement;

/// Ordered name/value pair of form data
pub type FieldPair = (String, String);

/// Value submitted for a checked checkbox or radio without `value`
const DEFAULT_CHECKED_VALUE: &str = "on";

/// Input types that never reach the form data set through collection
const SKIPPED_INPUT_TYPES: &[&str] = &["submit", "image", "reset", "file"];

/// Collect the name/value pairs of the form's successful controls
pub fn collect_fields<E: FormElement>(form: &E) -> Vec<FieldPair> {
    let mut pairs = Vec::new();

    for element in form.descendants() {
        let name = match element.attr("name") {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };

        if element.is("input") {
            if let Some(value) = input_value(&element) {
                pairs.push((name.to_string(), value));
            }
        } else if element.is("textarea") {
            pairs.push((name.to_string(), element.text_content()));
        } else if element.is("select") {
            for value in select_values(&element) {
                pairs.push((name.to_string(), value));
            }
        }
    }

    pairs
}

/// Returns true if clicking the element submits its form
///
/// That is `input[type=submit|image]`, and `button` elements without a
/// `type` attribute or with `type=submit`.
pub fn is_submit_element<E: FormElement>(element: &E) -> bool {
    if element.is("input") {
        element.attr_is("type", "submit") || element.attr_is("type", "image")
    } else if element.is("button") {
        !element.has_attr("type") || element.attr_is("type", "submit")
    } else {
        false
    }
}

/// Submit elements of the form, in document order
pub fn submit_elements<E: FormElement>(form: &E) -> Vec<E> {
    form.descendants()
        .into_iter()
        .filter(is_submit_element)
        .collect()
}

/// Value an `input` contributes, `None` if it is not submitted
fn input_value<E: FormElement>(input: &E) -> Option<String> {
    let input_type = input.attr("type").unwrap_or("text").to_ascii_lowercase();

    if SKIPPED_INPUT_TYPES.contains(&input_type.as_str()) {
        return None;
    }

    if input_type == "checkbox" || input_type == "radio" {
        if !input.has_attr("checked") {
            return None;
        }
        return Some(input.attr("value").unwrap_or(DEFAULT_CHECKED_VALUE).to_string());
    }

    Some(input.attr("value").unwrap_or_default().to_string())
}

/// Values a `select` contributes
///
/// A select without options contributes nothing. A single-choice select
/// falls back to its first option when none is selected.
fn select_values<E: FormElement>(select: &E) -> Vec<String> {
    let options: Vec<E> = select
        .descendants()
        .into_iter()
        .filter(|e| e.is("option"))
        .collect();

    if select.has_attr("multiple") {
        return options
            .iter()
            .filter(|option| option.has_attr("selected"))
            .map(option_value)
            .collect();
    }

    options
        .iter()
        .find(|option| option.has_attr("selected"))
        .or_else(|| options.first())
        .map(option_value)
        .into_iter()
        .collect()
}

fn option_value<E: FormElement>(option: &E) -> String {
    match option.attr("value") {
        Some(value) => value.to_string(),
        None => option
            .text_content()
            .trim_matches(|c: char| c.is_ascii_whitespace())
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlDocument;

    fn fields(html: &str) -> Vec<FieldPair> {
        let doc = HtmlDocument::parse(html, None);
        let form = doc.forms().into_iter().next().unwrap();
        collect_fields(&form)
    }

    fn pair(name: &str, value: &str) -> FieldPair {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_hidden_and_text_inputs() {
        let pairs = fields(
            r#"<form><input type="hidden" name="a" value="1"><input name="b"><input type="TEXT" name="c" value="3"></form>"#,
        );
        assert_eq!(pairs, vec![pair("a", "1"), pair("b", ""), pair("c", "3")]);
    }

    #[test]
    fn test_unnamed_elements_skipped() {
        let pairs = fields(r#"<form><input value="1"><input name="" value="2"><textarea>x</textarea></form>"#);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_checkbox_and_radio() {
        let pairs = fields(
            r#"<form>
            <input type="checkbox" name="a" value="x">
            <input type="checkbox" name="a" value="y" checked>
            <input type="CHECKBOX" name="b" checked>
            <input type="radio" name="c" value="r1">
            <input type="radio" name="c" value="r2" checked>
            </form>"#,
        );
        assert_eq!(pairs, vec![pair("a", "y"), pair("b", "on"), pair("c", "r2")]);
    }

    #[test]
    fn test_submit_reset_file_and_buttons_skipped() {
        let pairs = fields(
            r#"<form>
            <input type="submit" name="s" value="1">
            <input type="image" name="i" value="2">
            <input type="reset" name="r" value="3">
            <input type="file" name="f">
            <button name="b" value="4">B</button>
            <button type="button" name="bb" value="5">BB</button>
            <input type="button" name="ib" value="6">
            </form>"#,
        );
        assert_eq!(pairs, vec![pair("ib", "6")]);
    }

    #[test]
    fn test_textarea_uses_text_content() {
        let pairs = fields(r#"<form><textarea name="t" value="ignored">hello world</textarea></form>"#);
        assert_eq!(pairs, vec![pair("t", "hello world")]);
    }

    #[test]
    fn test_select_without_options() {
        let pairs = fields(r#"<form><select name="a" value="b"></select><select multiple name="c"></select></form>"#);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_select_single_choice() {
        let pairs = fields(
            r#"<form>
            <select name="first"><option value="b">B</option><option value="c">C</option></select>
            <select name="picked"><option value="b">B</option><option selected value="c">C</option></select>
            <select name="text"><option>  Label  </option></select>
            </form>"#,
        );
        assert_eq!(
            pairs,
            vec![pair("first", "b"), pair("picked", "c"), pair("text", "Label")]
        );
    }

    #[test]
    fn test_select_multiple() {
        let pairs = fields(
            r#"<form>
            <select multiple name="none"><option value="b">B</option><option value="c">C</option></select>
            <select multiple name="all"><option value="b" selected>B</option><option value="c" selected>C</option></select>
            </form>"#,
        );
        assert_eq!(pairs, vec![pair("all", "b"), pair("all", "c")]);
    }

    #[test]
    fn test_select_with_optgroup() {
        let pairs = fields(
            r#"<form><select name="a"><optgroup label="g"><option value="x">X</option><option value="y" selected>Y</option></optgroup></select></form>"#,
        );
        assert_eq!(pairs, vec![pair("a", "y")]);
    }

    #[test]
    fn test_submit_elements() {
        let doc = HtmlDocument::parse(
            r#"<form>
            <input type="image" name="a">
            <input type="Submit" name="b">
            <button name="c">C</button>
            <button type="submit" name="d">D</button>
            <button type="" name="e">E</button>
            <button type="button" name="f">F</button>
            <button type="reset" name="g">G</button>
            <input type="button" name="h">
            </form>"#,
            None,
        );
        let form = doc.forms().into_iter().next().unwrap();
        let elements = submit_elements(&form);
        let names: Vec<&str> = elements.iter().map(|e| e.attr("name").unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    /// Element tree that keeps tag names as written
    #[derive(Clone, PartialEq)]
    struct Node {
        tag: &'static str,
        attrs: Vec<(&'static str, &'static str)>,
        children: Vec<Node>,
    }

    fn node(tag: &'static str, attrs: &[(&'static str, &'static str)]) -> Node {
        Node {
            tag,
            attrs: attrs.to_vec(),
            children: Vec::new(),
        }
    }

    impl FormElement for Node {
        fn tag_name(&self) -> &str {
            self.tag
        }

        fn attr(&self, name: &str) -> Option<&str> {
            self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
        }

        fn descendants(&self) -> Vec<Self> {
            self.children
                .iter()
                .flat_map(|child| std::iter::once(child.clone()).chain(child.descendants()))
                .collect()
        }

        fn ancestor(&self, _tag: &str) -> Option<Self> {
            None
        }

        fn text_content(&self) -> String {
            String::new()
        }

        fn base_url(&self) -> Option<&url::Url> {
            None
        }
    }

    #[test]
    fn test_uppercase_tag_names() {
        let mut form = node("FORM", &[]);
        form.children = vec![
            node("INPUT", &[("name", "a"), ("value", "1")]),
            node("Input", &[("type", "submit"), ("name", "s"), ("value", "go")]),
            node("BUTTON", &[("name", "b"), ("value", "2")]),
            node("TEXTAREA", &[("name", "t")]),
        ];

        assert_eq!(collect_fields(&form), vec![pair("a", "1"), pair("t", "")]);
        let names: Vec<String> = submit_elements(&form)
            .iter()
            .map(|e| e.attr("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["s", "b"]);
    }
}
