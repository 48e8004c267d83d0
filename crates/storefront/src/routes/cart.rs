//! Cart route handlers.
//!
//! Every mutation is a plain form post that persists the shopper's storage
//! and redirects, so the cart page always re-renders from stored state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use demo_shop_core::{Cart, LineItem, cart::read_cart};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::Notice;
use crate::shopper::{PageContext, Shopper};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Position in the cart, used by the update and remove forms.
    pub index: usize,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, line)| CartItemView::new(index, line))
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl CartItemView {
    fn new(index: usize, line: &LineItem) -> Self {
        Self {
            index,
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    /// Search term to return to on the product list.
    #[serde(default)]
    pub search: String,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub quantity: i64,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<CartShowTemplate> {
    let cart = read_cart(&shopper);

    Ok(CartShowTemplate {
        page: shopper.page().await?,
        cart: CartView::from(&cart),
    })
}

/// Add one unit of a catalog product.
///
/// The price is taken from the catalog, never from the form.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    mut shopper: Shopper,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .find(&form.name)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.name)))?;

    shopper.cart().add(&product.name, product.price)?;
    add_breadcrumb("cart", "Added to cart", Some(&[("product", product.name.as_str())]));

    shopper
        .notify(Notice::success(format!("{} added to cart!", product.name)))
        .await?;
    shopper.commit().await?;

    Ok(Redirect::to(&products_url(&form.search)))
}

/// Set a line's quantity; zero or below removes it.
#[instrument(skip(shopper))]
pub async fn update(mut shopper: Shopper, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    shopper.cart().set_quantity(form.index, form.quantity)?;
    shopper.commit().await?;

    Ok(Redirect::to("/cart"))
}

/// Remove a line.
#[instrument(skip(shopper))]
pub async fn remove(
    mut shopper: Shopper,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    match shopper.cart().remove(form.index)? {
        Some(line) => tracing::debug!(name = %line.name, "Cart line removed"),
        None => tracing::warn!(index = form.index, "Remove requested for a missing cart line"),
    }
    shopper.commit().await?;

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(shopper))]
pub async fn clear(mut shopper: Shopper) -> Result<Redirect> {
    shopper.cart().clear();
    shopper.commit().await?;

    Ok(Redirect::to("/cart"))
}

/// Cart count badge fragment.
#[instrument(skip(shopper))]
pub async fn count(shopper: Shopper) -> Response {
    CartCountTemplate {
        count: read_cart(&shopper).item_count(),
    }
    .into_response()
}

/// Product list URL that restores the shopper's search term.
fn products_url(search: &str) -> String {
    if search.trim().is_empty() {
        "/products".to_string()
    } else {
        format!("/products?search={}", urlencoding::encode(search))
    }
}
