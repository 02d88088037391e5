//! Field extraction for product detail pages

use crate::config::{ExtractionConfig, SelectorSchema};
use crate::extract::selector::SelectorSpec;
use crate::extract::text::{clean_text, parse_price};
use crate::url::resolve_asset;
use scraper::Html;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Price as stored in a product record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Parsed, finite and non-negative
    Amount(f64),
    /// Cleaned display text, kept when price parsing is disabled
    Text(String),
}

impl PriceValue {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Text(_) => None,
        }
    }
}

/// Field values extracted from one detail page
///
/// Optional fields are `None` when their selector is missing from the
/// schema or matched nothing usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    pub features: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls_all: Option<Vec<String>>,
}

/// Applies a detail selector schema to parsed pages
///
/// Selectors are compiled once when the extractor is built and reused for
/// every page. Extraction is pure: no network access, and the same document,
/// URL and schema always produce the same fields.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    name: Option<SelectorSpec>,
    description: Option<SelectorSpec>,
    brand: Option<SelectorSpec>,
    sub_category: Option<SelectorSpec>,
    price: Option<SelectorSpec>,
    currency: Option<SelectorSpec>,
    attributes: Vec<(String, SelectorSpec)>,
    features: Option<SelectorSpec>,
    image_url: Option<SelectorSpec>,
    image_urls_all: Option<SelectorSpec>,
    options: ExtractionConfig,
}

impl FieldExtractor {
    /// Compiles the schema's selectors
    pub fn new(schema: &SelectorSchema, options: &ExtractionConfig) -> Self {
        let compile = |sel: &Option<String>| sel.as_deref().map(SelectorSpec::parse);

        Self {
            name: compile(&schema.name),
            description: compile(&schema.description),
            brand: compile(&schema.brand),
            sub_category: compile(&schema.sub_category),
            price: compile(&schema.price),
            currency: compile(&schema.currency),
            attributes: schema
                .attributes
                .iter()
                .map(|(attr, sel)| (attr.clone(), SelectorSpec::parse(sel)))
                .collect(),
            features: compile(&schema.features),
            image_url: compile(&schema.image_url),
            image_urls_all: compile(&schema.image_urls_all),
            options: options.clone(),
        }
    }

    /// Extracts every schema field from a parsed detail page
    ///
    /// # Arguments
    ///
    /// * `document` - The parsed detail page
    /// * `page_url` - The page's URL, used to make image URLs absolute
    pub fn extract(&self, document: &Html, page_url: &Url) -> ExtractedFields {
        let price = self.price.as_ref().and_then(|spec| {
            let text = spec.select_first(document)?;
            if self.options.parse_price {
                parse_price(&text).map(PriceValue::Amount)
            } else {
                clean_text(&text).map(PriceValue::Text)
            }
        });

        let currency = self
            .scalar(document, self.currency.as_ref())
            .unwrap_or_else(|| self.options.default_currency.clone());

        let attributes = self
            .attributes
            .iter()
            .filter_map(|(attr, spec)| {
                let value = spec.select_first(document).and_then(|v| clean_text(&v))?;
                Some((attr.clone(), value))
            })
            .collect();

        let features = self
            .features
            .as_ref()
            .map(|spec| {
                spec.select_all(document)
                    .into_iter()
                    .filter_map(|feature| self.tidy(feature))
                    .collect()
            })
            .unwrap_or_default();

        let image_url = self
            .image_url
            .as_ref()
            .and_then(|spec| spec.select_first(document))
            .and_then(|src| resolve_asset(page_url, &src));

        let image_urls_all = if self.options.extract_all_images {
            self.image_urls_all.as_ref().map(|spec| {
                spec.select_all(document)
                    .iter()
                    .filter_map(|src| resolve_asset(page_url, src))
                    .collect()
            })
        } else {
            None
        };

        ExtractedFields {
            name: self.scalar(document, self.name.as_ref()),
            description: self.scalar(document, self.description.as_ref()),
            brand: self.scalar(document, self.brand.as_ref()),
            sub_category: self.scalar(document, self.sub_category.as_ref()),
            price,
            currency: Some(currency),
            attributes,
            features,
            image_url,
            image_urls_all,
        }
    }

    fn scalar(&self, document: &Html, spec: Option<&SelectorSpec>) -> Option<String> {
        let value = spec?.select_first(document)?;
        self.tidy(value)
    }

    /// Applies `clean_text` when enabled; empty values become absent either way
    fn tidy(&self, value: String) -> Option<String> {
        if self.options.clean_text {
            clean_text(&value)
        } else if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}
