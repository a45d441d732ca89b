use serde::{Deserialize, Serialize};

use super::SubmitMode;
use super::lenient;

/// A product listed on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub banner_image: Option<String>,
}

impl Product {
    /// Cost as shown in the product table.
    pub fn display_cost(&self) -> String {
        format_cost(self.cost)
    }

    pub fn submit_mode(&self) -> SubmitMode {
        SubmitMode::from_id(self.id.map(|id| id.to_string()).as_deref())
    }

    /// Banner URL, unless it is blank.
    pub fn banner(&self) -> Option<&str> {
        self.banner_image
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Parses the cost input. Blank input is zero; anything else must be a
/// non-negative finite number.
pub fn parse_cost(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Some(0.0);
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|cost| cost.is_finite() && *cost >= 0.0)
}

pub fn format_cost(cost: f64) -> String {
    format!("${cost:.2}")
}

/// The dashboard form's working copy of a product.
///
/// `cost` keeps the raw input so a half-typed number is not lost on re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub cost: String,
    pub banner_image: Option<String>,
}

impl ProductDraft {
    /// An empty form showing `default_image` as its banner.
    pub fn blank(default_image: &str) -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            cost: "0".to_string(),
            banner_image: Some(default_image.to_string()),
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            cost: product.cost.to_string(),
            banner_image: product.banner_image.clone(),
        }
    }

    pub const fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Builds the product to send.
    ///
    /// # Errors
    /// Returns a user-facing message when the title or cost is unusable.
    pub fn to_product(&self) -> Result<Product, &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required.");
        }
        let cost = parse_cost(&self.cost).ok_or("Cost must be a valid amount.")?;
        Ok(Product {
            id: self.id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            cost,
            banner_image: self.banner_image.clone(),
        })
    }
}
