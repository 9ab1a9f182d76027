//! Produce catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base unit price used when a product is not in the catalog
pub const DEFAULT_BASE_PRICE: i64 = 50;

/// Broad produce category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Vegetable,
    Fruit,
    #[serde(rename = "Leafy Green")]
    LeafyGreen,
    #[serde(rename = "Root Vegetable")]
    RootVegetable,
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Vegetable => write!(f, "Vegetable"),
            ProductCategory::Fruit => write!(f, "Fruit"),
            ProductCategory::LeafyGreen => write!(f, "Leafy Green"),
            ProductCategory::RootVegetable => write!(f, "Root Vegetable"),
        }
    }
}

/// A product that can be received at intake
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ProductCategory,
    /// Selling unit (kg, dozen, piece)
    pub unit: &'static str,
    /// Shelf-life modifier in tenths (10 = 1.0)
    #[serde(skip)]
    modifier_tenths: i64,
    /// Base price per unit before the grade multiplier
    pub base_price: i64,
}

impl Product {
    const fn new(
        id: &'static str,
        name: &'static str,
        category: ProductCategory,
        unit: &'static str,
        modifier_tenths: i64,
        base_price: i64,
    ) -> Self {
        Self {
            id,
            name,
            category,
            unit,
            modifier_tenths,
            base_price,
        }
    }

    /// Multiplier applied to the grade/storage base shelf life
    pub fn shelf_life_modifier(&self) -> Decimal {
        Decimal::new(self.modifier_tenths, 1)
    }
}

use ProductCategory::*;

/// Product catalog. Grade prices derive from `base_price` with exact decimal
/// rounding, see [`crate::pricing::product_price`].
pub const PRODUCTS: &[Product] = &[
    Product::new("tomato", "Tomato", Vegetable, "kg", 10, 40),
    Product::new("potato", "Potato", RootVegetable, "kg", 30, 30),
    Product::new("onion", "Onion", Vegetable, "kg", 25, 35),
    Product::new("carrot", "Carrot", RootVegetable, "kg", 20, 45),
    Product::new("cabbage", "Cabbage", LeafyGreen, "kg", 15, 25),
    Product::new("spinach", "Spinach", LeafyGreen, "kg", 5, 60),
    Product::new("broccoli", "Broccoli", Vegetable, "kg", 8, 80),
    Product::new("cauliflower", "Cauliflower", Vegetable, "kg", 10, 50),
    Product::new("capsicum", "Capsicum", Vegetable, "kg", 10, 70),
    Product::new("cucumber", "Cucumber", Vegetable, "kg", 8, 35),
    Product::new("eggplant", "Eggplant", Vegetable, "kg", 10, 45),
    Product::new("lettuce", "Lettuce", LeafyGreen, "kg", 4, 55),
    Product::new("apple", "Apple", Fruit, "kg", 20, 120),
    Product::new("banana", "Banana", Fruit, "dozen", 6, 50),
    Product::new("orange", "Orange", Fruit, "kg", 20, 80),
    Product::new("mango", "Mango", Fruit, "kg", 8, 150),
    Product::new("grapes", "Grapes", Fruit, "kg", 7, 100),
    Product::new("watermelon", "Watermelon", Fruit, "piece", 12, 40),
    Product::new("strawberry", "Strawberry", Fruit, "kg", 4, 200),
    Product::new("pineapple", "Pineapple", Fruit, "piece", 10, 60),
];

/// Look up a product by its id
pub fn product_by_id(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Shelf-life modifier for a product id, 1.0 when unknown
pub fn shelf_life_modifier(product_id: &str) -> Decimal {
    product_by_id(product_id)
        .map(Product::shelf_life_modifier)
        .unwrap_or(Decimal::ONE)
}

/// Base unit price for a product id, [`DEFAULT_BASE_PRICE`] when unknown
pub fn base_price(product_id: &str) -> i64 {
    product_by_id(product_id)
        .map(|p| p.base_price)
        .unwrap_or(DEFAULT_BASE_PRICE)
}

/// Display name for a product id, falling back to the id itself
pub fn product_name(product_id: &str) -> &str {
    product_by_id(product_id).map(|p| p.name).unwrap_or(product_id)
}

/// Selling unit for a product id, kg when unknown
pub fn product_unit(product_id: &str) -> &'static str {
    product_by_id(product_id).map(|p| p.unit).unwrap_or("kg")
}

/// Case-insensitive search over product name and category
pub fn search_products(query: &str) -> Vec<&'static Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return PRODUCTS.iter().collect();
    }
    PRODUCTS
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query)
                || p.category.to_string().to_lowercase().contains(&query)
        })
        .collect()
}
