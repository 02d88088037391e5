//! Selector micro-language
//!
//! A selector is either a plain CSS selector, which yields the trimmed text
//! content of each matched element, or `<css>::attr(<name>)`, which yields the
//! value of attribute `<name>` on each matched element. Whether one value or
//! all values are wanted is decided by the caller.

use scraper::{ElementRef, Html, Selector};

const ATTR_MARKER: &str = "::attr(";

/// What a selector reads from each matched element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorTarget {
    /// Trimmed text content
    Text,
    /// Value of the named attribute
    Attribute(String),
}

/// A parsed, compiled selector
#[derive(Debug, Clone)]
pub struct SelectorSpec {
    raw: String,
    css: String,
    target: SelectorTarget,
    /// `None` when the CSS part does not parse; such a selector never matches
    compiled: Option<Selector>,
}

impl SelectorSpec {
    /// Parses a selector string
    ///
    /// Never fails: a selector whose CSS part is invalid is kept but matches
    /// nothing, so one bad selector cannot take down a whole page.
    ///
    /// # Example
    ///
    /// ```
    /// use shelf_scout::extract::{SelectorSpec, SelectorTarget};
    ///
    /// let spec = SelectorSpec::parse("img.main::attr(src)");
    /// assert_eq!(spec.css(), "img.main");
    /// assert_eq!(spec.target(), &SelectorTarget::Attribute("src".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let (css, target) = split_attr(raw);

        let compiled = match Selector::parse(&css) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::debug!("Selector '{}' does not parse: {:?}", raw, e);
                None
            }
        };

        Self {
            raw: raw.to_string(),
            css,
            target,
            compiled,
        }
    }

    /// Parses a selector, reading `default_attr` when no `::attr()` suffix is given
    ///
    /// Used for listing links, where a plain `a.product` selector means the
    /// anchors' `href` rather than their text.
    pub fn parse_with_default_attr(raw: &str, default_attr: &str) -> Self {
        let mut spec = Self::parse(raw);
        if spec.target == SelectorTarget::Text {
            spec.target = SelectorTarget::Attribute(default_attr.to_string());
        }
        spec
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn target(&self) -> &SelectorTarget {
        &self.target
    }

    /// Returns true if the CSS part compiled
    pub fn is_valid(&self) -> bool {
        self.compiled.is_some()
    }

    /// Evaluates the selector in single or multi mode
    ///
    /// Single mode yields at most the first matched element's value; multi
    /// mode yields every non-empty value in document order.
    pub fn evaluate(&self, document: &Html, multi: bool) -> Vec<String> {
        if multi {
            self.select_all(document)
        } else {
            self.select_first(document).into_iter().collect()
        }
    }

    /// Value of the first matched element, if it has a non-empty one
    pub fn select_first(&self, document: &Html) -> Option<String> {
        let selector = self.compiled.as_ref()?;
        let element = document.select(selector).next()?;
        self.read(element)
    }

    /// Non-empty values of every matched element, in document order
    pub fn select_all(&self, document: &Html) -> Vec<String> {
        let Some(selector) = self.compiled.as_ref() else {
            return Vec::new();
        };

        document
            .select(selector)
            .filter_map(|element| self.read(element))
            .collect()
    }

    fn read(&self, element: ElementRef<'_>) -> Option<String> {
        let value = match &self.target {
            SelectorTarget::Text => element.text().collect::<String>().trim().to_string(),
            SelectorTarget::Attribute(name) => element.value().attr(name)?.trim().to_string(),
        };

        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Splits `css::attr(name)` into its parts; anything else is all CSS
fn split_attr(raw: &str) -> (String, SelectorTarget) {
    let trimmed = raw.trim();

    if let Some(stripped) = trimmed.strip_suffix(')') {
        if let Some(pos) = stripped.rfind(ATTR_MARKER) {
            let css = stripped[..pos].trim();
            let attr = stripped[pos + ATTR_MARKER.len()..].trim();
            if !css.is_empty() && !attr.is_empty() {
                return (
                    css.to_string(),
                    SelectorTarget::Attribute(attr.to_string()),
                );
            }
        }
    }

    (trimmed.to_string(), SelectorTarget::Text)
}
