//! Catalogue records the storefront carousels are fed from.
//!
//! Each record knows how to present itself as an [`Item`]; the carousels
//! never look past that conversion.

use crate::error::{ModelError, Result};
use crate::item::Item;

/// Promotional banner shown by the banner strip.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Banner {
    pub src: String,
    pub alt: String,
}

impl Banner {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.src.trim().is_empty() {
            return Err(ModelError::MissingField("src"));
        }
        if self.alt.trim().is_empty() {
            return Err(ModelError::MissingField("alt"));
        }
        Ok(())
    }
}

impl From<&Banner> for Item {
    fn from(banner: &Banner) -> Self {
        Item::new(banner.src.clone(), banner.alt.clone())
    }
}

/// Product card shown by the product rail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Product {
    pub id: u32,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand: Option<String>,
    pub price: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub original_price: Option<f64>,
    pub image: String,
}

impl Product {
    /// A discount exists only when the original price is strictly higher.
    pub fn has_discount(&self) -> bool {
        self.original_price
            .is_some_and(|original| original > self.price)
    }

    /// Rounded discount percentage, `0` when there is no discount.
    pub fn discount_pct(&self) -> u32 {
        match self.original_price {
            Some(original) if original > self.price && original > 0.0 => {
                (((original - self.price) / original) * 100.0).round() as u32
            }
            _ => 0,
        }
    }

    /// Route followed when the card is activated.
    pub fn href(&self) -> String {
        format!("/producto/{}", self.id)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField("name"));
        }
        if self.image.trim().is_empty() {
            return Err(ModelError::MissingField("image"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::InvalidPrice(self.price));
        }
        if let Some(original) = self.original_price
            && (!original.is_finite() || original < 0.0)
        {
            return Err(ModelError::InvalidPrice(original));
        }
        Ok(())
    }
}

impl From<&Product> for Item {
    fn from(product: &Product) -> Self {
        Item::new(product.image.clone(), product.name.clone())
            .with_link(product.href())
    }
}

/// Category tile shown by the category strip.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub href: Option<String>,
}

impl Category {
    /// Fallback text for tiles without an image: the upper-cased first
    /// letter of the first two words.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField("name"));
        }
        Ok(())
    }
}

impl From<&Category> for Item {
    fn from(category: &Category) -> Self {
        Item::new(category.image.clone().unwrap_or_default(), &category.name)
            .with_link(category.href.clone().unwrap_or_else(|| "#".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, original_price: Option<f64>) -> Product {
        Product {
            id: 7,
            name: "Queso de hoja".to_string(),
            brand: Some("Lácteos del Valle".to_string()),
            price,
            original_price,
            image: "/img/queso.png".to_string(),
        }
    }

    #[test]
    fn discount_requires_strictly_higher_original_price() {
        assert!(!product(100.0, None).has_discount());
        assert!(!product(100.0, Some(100.0)).has_discount());
        assert!(product(75.0, Some(100.0)).has_discount());
        assert_eq!(product(75.0, Some(100.0)).discount_pct(), 25);
        assert_eq!(product(100.0, Some(90.0)).discount_pct(), 0);
    }

    #[test]
    fn discount_pct_rounds_to_nearest() {
        // 1/3 off
        assert_eq!(product(200.0, Some(300.0)).discount_pct(), 33);
        assert_eq!(product(1.0, Some(3.0)).discount_pct(), 67);
    }

    #[test]
    fn product_item_links_to_detail_route() {
        let item = Item::from(&product(10.0, None));
        assert_eq!(item.label, "Queso de hoja");
        assert_eq!(item.link.as_deref(), Some("/producto/7"));
    }

    #[test]
    fn invalid_prices_are_rejected() {
        assert_eq!(
            product(-1.0, None).validate(),
            Err(ModelError::InvalidPrice(-1.0))
        );
        assert!(product(f64::NAN, None).validate().is_err());
        assert!(product(5.0, Some(f64::INFINITY)).validate().is_err());
        assert!(product(5.0, Some(8.0)).validate().is_ok());
    }

    #[test]
    fn category_initials_use_first_two_words() {
        let category = Category {
            id: 1,
            name: "frutas y vegetales".to_string(),
            image: None,
            href: None,
        };
        assert_eq!(category.initials(), "FY");

        let single = Category {
            name: "panadería".to_string(),
            ..category.clone()
        };
        assert_eq!(single.initials(), "P");
    }

    #[test]
    fn category_item_defaults_link_and_image() {
        let category = Category {
            id: 3,
            name: "Carnes".to_string(),
            image: None,
            href: None,
        };
        let item = Item::from(&category);
        assert_eq!(item.image, "");
        assert_eq!(item.link.as_deref(), Some("#"));
    }

    #[test]
    fn banner_requires_alt_text() {
        assert_eq!(
            Banner::new("/banners/pan.svg", " ").validate(),
            Err(ModelError::MissingField("alt"))
        );
        let item = Item::from(&Banner::new("/banners/pan.svg", "Pan"));
        assert!(item.link.is_none());
        assert!(item.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn product_deserializes_camel_case_fields() {
        let json = r#"{"id":1,"name":"Vino tinto","price":900.0,
            "originalPrice":1200.0,"image":"/img/vino.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.original_price, Some(1200.0));
        assert!(product.brand.is_none());
        assert_eq!(product.discount_pct(), 25);
    }
}
