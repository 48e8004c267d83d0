//! The fixed product catalog and its search.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
}

impl Category {
    /// Lowercase slug, e.g. `electronics`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Price,
    pub category: Category,
}

impl Product {
    fn new(name: &str, cents: i64, category: Category) -> Self {
        Self {
            name: name.to_owned(),
            price: Price::from_cents(cents),
            category,
        }
    }
}

/// The in-memory product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo store's eight products.
    #[must_use]
    pub fn demo() -> Self {
        use Category::Electronics;

        Self::new(vec![
            Product::new("Laptop", 99_999, Electronics),
            Product::new("MacBook", 129_999, Electronics),
            Product::new("iPhone", 79_999, Electronics),
            Product::new("iPad", 59_999, Electronics),
            Product::new("Headphones", 19_999, Electronics),
            Product::new("Keyboard", 9_999, Electronics),
            Product::new("Mouse", 4_999, Electronics),
            Product::new("Monitor", 29_999, Electronics),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look a product up by its exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Case-insensitive substring search over product names.
    ///
    /// The term is trimmed and lowercased. A blank term matches everything
    /// and produces no results message.
    #[must_use]
    pub fn search(&self, term: &str) -> SearchResults<'_> {
        let needle = term.trim().to_lowercase();

        if needle.is_empty() {
            return SearchResults {
                term: None,
                products: self.products.iter().collect(),
            };
        }

        let products = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect();

        SearchResults {
            term: Some(term.trim().to_owned()),
            products,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

/// Outcome of [`Catalog::search`].
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    /// The trimmed term as the shopper typed it; `None` for a blank search.
    pub term: Option<String>,
    pub products: Vec<&'a Product>,
}

impl SearchResults<'_> {
    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Summary shown above the grid, present only for a non-blank term.
    #[must_use]
    pub fn message(&self) -> Option<SearchMessage> {
        let term = self.term.as_deref()?;

        Some(if self.products.is_empty() {
            SearchMessage {
                found: false,
                text: format!("No products found for \"{term}\""),
            }
        } else {
            SearchMessage {
                found: true,
                text: format!("Found {} product(s) for \"{term}\"", self.products.len()),
            }
        })
    }
}

/// Result-count message for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMessage {
    /// `true` when at least one product matched.
    pub found: bool,
    pub text: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names<'a>(results: &'a SearchResults<'_>) -> Vec<&'a str> {
        results.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_demo_catalog() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.products().len(), 8);
        assert!(
            catalog
                .products()
                .iter()
                .all(|p| p.category == Category::Electronics)
        );
        assert_eq!(
            catalog.find("MacBook").unwrap().price,
            Price::from_cents(129_999)
        );
        assert!(catalog.find("macbook").is_none());
    }

    #[test]
    fn test_search_phone_is_case_insensitive_substring() {
        let catalog = Catalog::demo();
        let results = catalog.search("phone");

        assert_eq!(names(&results), ["iPhone", "Headphones"]);
        let message = results.message().unwrap();
        assert!(message.found);
        assert_eq!(message.text, "Found 2 product(s) for \"phone\"");
    }

    #[test]
    fn test_search_ignores_case_of_term() {
        let catalog = Catalog::demo();
        assert_eq!(
            names(&catalog.search("LAPTOP")),
            names(&catalog.search("laptop"))
        );
        assert_eq!(names(&catalog.search("  Laptop ")), ["Laptop"]);
    }

    #[test]
    fn test_blank_search_returns_everything_without_message() {
        let catalog = Catalog::demo();
        for term in ["", "   "] {
            let results = catalog.search(term);
            assert_eq!(results.products.len(), 8);
            assert!(results.message().is_none());
        }
    }

    #[test]
    fn test_search_without_matches() {
        let catalog = Catalog::demo();
        let results = catalog.search("xyz123nonexistent");

        assert!(results.is_empty());
        let message = results.message().unwrap();
        assert!(!message.found);
        assert_eq!(message.text, "No products found for \"xyz123nonexistent\"");
    }

    #[test]
    fn test_search_special_characters_match_nothing() {
        let catalog = Catalog::demo();
        assert!(catalog.search("@#$%").is_empty());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Electronics).unwrap(),
            "\"electronics\""
        );
    }
}
