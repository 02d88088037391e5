//! Extraction module: the selector language and the detail-page field extractor
//!
//! - `SelectorSpec`: evaluates plain CSS or `css::attr(name)` selectors
//! - `FieldExtractor`: applies a named selector schema to a page
//! - `clean_text` / `parse_price`: the text policies applied to field values
//!
//! Nothing in this module fails loudly: a selector that does not parse or
//! does not match simply leaves its field empty.

mod fields;
mod selector;
mod text;

pub use fields::{ExtractedFields, FieldExtractor, PriceValue};
pub use selector::{SelectorSpec, SelectorTarget};
pub use text::{clean_text, parse_price};
