//! Product listing and search.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use demo_shop_core::{Product, SearchMessage};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::shopper::{PageContext, Shopper};
use crate::state::AppState;

/// Product list query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    #[serde(default)]
    pub search: String,
}

/// Product card display data.
#[derive(Clone)]
pub struct ProductView {
    pub name: String,
    pub price: String,
    pub category: &'static str,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.as_str(),
        }
    }
}

/// Search result-count message display data.
#[derive(Clone)]
pub struct SearchMessageView {
    pub class: &'static str,
    pub text: String,
}

impl From<SearchMessage> for SearchMessageView {
    fn from(message: SearchMessage) -> Self {
        Self {
            class: if message.found {
                "alert alert-success"
            } else {
                "alert alert-danger"
            },
            text: message.text,
        }
    }
}

/// Product list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub page: PageContext,
    pub search: String,
    pub products: Vec<ProductView>,
    pub search_message: Option<SearchMessageView>,
}

/// `/` lands on the product list.
pub async fn home() -> Redirect {
    Redirect::to("/products")
}

/// Display the product list, filtered by `?search=` when present.
#[instrument(skip(state, shopper))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
    shopper: Shopper,
) -> Result<ProductsTemplate> {
    let results = state.catalog().search(&query.search);
    tracing::debug!(matches = results.products.len(), "Catalog searched");

    Ok(ProductsTemplate {
        page: shopper.page().await?,
        search_message: results.message().map(SearchMessageView::from),
        products: results.products.iter().copied().map(ProductView::from).collect(),
        search: query.search,
    })
}
