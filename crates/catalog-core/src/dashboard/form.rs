//! Product create/edit form.

use crate::catalog::{Product, ProductBrand, ProductDraft};
use crate::ids::{BrandId, ProductId};
use crate::price::Price;
use crate::url::normalize_affiliate_url;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit => "edit",
        }
    }
}

/// A single field edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FormField {
    Name(String),
    Brand(String),
    Category(String),
    Price(String),
    Available(bool),
    AffiliateUrl(String),
    ImageUrl(Option<String>),
}

/// Raw form contents, as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    /// Present when editing.
    pub id: Option<ProductId>,
    /// Existing code when editing; codes are not editable.
    pub code: Option<String>,
    pub name: String,
    pub brand: String,
    /// Brand row the product links to; dropped once the brand text is edited.
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    pub category: String,
    pub price: String,
    pub available: bool,
    pub affiliate_url: String,
    pub image_url: Option<String>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            name: String::new(),
            brand: String::new(),
            brand_id: None,
            category: String::new(),
            price: String::new(),
            available: true,
            affiliate_url: String::new(),
            image_url: None,
        }
    }
}

impl ProductForm {
    /// Empty form in create mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled for editing `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            code: Some(product.code.clone()),
            name: product.name.clone(),
            brand: product.brand_name().to_string(),
            brand_id: product.brand.as_ref().and_then(|b| b.brand_id()).cloned(),
            category: product.category.clone(),
            price: if product.price.is_valid() {
                product.price.value().to_string()
            } else {
                String::new()
            },
            available: product.available,
            affiliate_url: product.affiliate_url.clone().unwrap_or_default(),
            image_url: product.image_url.clone(),
        }
    }

    /// Create when there is no id, edit otherwise.
    pub fn mode(&self) -> FormMode {
        if self.id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    /// Apply a single field edit.
    pub fn apply(&mut self, field: FormField) {
        match field {
            FormField::Name(v) => self.name = v,
            FormField::Brand(v) => {
                self.brand = v;
                self.brand_id = None;
            }
            FormField::Category(v) => self.category = v,
            FormField::Price(v) => self.price = v,
            FormField::Available(v) => self.available = v,
            FormField::AffiliateUrl(v) => self.affiliate_url = v,
            FormField::ImageUrl(v) => self.image_url = v,
        }
    }

    /// Validate and build the store payload with the given code.
    ///
    /// Name and category are required and the price must be a finite,
    /// non-negative number. An untouched linked brand stays linked, even when
    /// its name was never resolved; otherwise the brand is passed on as free
    /// text and resolving it to a brand row is the caller's job.
    pub fn to_draft(&self, code: impl Into<String>) -> Result<ProductDraft, CatalogError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::ValidationError("name is required".to_string()));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(CatalogError::ValidationError("category is required".to_string()));
        }

        let price = Price::parse(&self.price);
        if !price.is_valid() || price.value() < 0.0 {
            return Err(CatalogError::ValidationError(format!(
                "price must be a non-negative number, got {:?}",
                self.price
            )));
        }

        let brand_text = self.brand.trim();
        let brand = match &self.brand_id {
            Some(id) => Some(ProductBrand::Linked {
                id: id.clone(),
                name: (!brand_text.is_empty()).then(|| brand_text.to_string()),
            }),
            None if brand_text.is_empty() => None,
            None => Some(ProductBrand::Name(brand_text.to_string())),
        };
        Ok(ProductDraft {
            code: code.into(),
            name: name.to_string(),
            brand,
            category: category.to_string(),
            price,
            available: self.available,
            affiliate_url: normalize_affiliate_url(&self.affiliate_url),
            image_url: self.image_url.clone().filter(|u| !u.trim().is_empty()),
        })
    }
}
