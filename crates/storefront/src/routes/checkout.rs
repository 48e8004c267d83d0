//! Checkout and order confirmation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use demo_shop_core::{BillingDetails, CheckoutError, account, checkout};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::models::Notice;
use crate::routes::cart::CartView;
use crate::shopper::{PageContext, Shopper};

/// Checkout form data.
///
/// Every field is optional; missing fields become empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub telephone: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
    pub zone: String,
    /// Present (usually `"on"`) only when the terms box is ticked.
    pub agree: Option<String>,
}

impl CheckoutForm {
    /// Split into billing details and the terms flag.
    fn into_parts(self) -> (BillingDetails, bool) {
        let accepted = self.agree.is_some();
        let details = BillingDetails {
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            telephone: self.telephone,
            address: self.address,
            city: self.city,
            postcode: self.postcode,
            country: self.country,
            zone: self.zone,
        };
        (details, accepted)
    }
}

/// Success page query parameters.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub order: Option<String>,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub page: PageContext,
    pub cart: CartView,
    pub form: BillingDetails,
    pub terms_accepted: bool,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct SuccessTemplate {
    pub page: PageContext,
    pub order_id: Option<String>,
}

/// Display the billing form. An empty cart bounces back to the cart page.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<Response> {
    let cart = match checkout::require_items(&shopper) {
        Ok(cart) => cart,
        Err(CheckoutError::EmptyCart) => return empty_cart_redirect(&shopper).await,
        Err(e) => return Err(e.into()),
    };

    let form = BillingDetails {
        email: account::user_email(&shopper).unwrap_or_default(),
        ..BillingDetails::default()
    };

    Ok(CheckoutTemplate {
        page: shopper.page().await?,
        cart: CartView::from(&cart),
        form,
        terms_accepted: false,
    }
    .into_response())
}

/// Place the order.
///
/// Without the terms box ticked the form is shown again with the entered
/// values and nothing is stored.
#[instrument(skip(shopper, form))]
pub async fn submit(mut shopper: Shopper, Form(form): Form<CheckoutForm>) -> Result<Response> {
    let (details, terms_accepted) = form.into_parts();

    match checkout::place_order(&mut shopper, details.clone(), terms_accepted, Utc::now()) {
        Ok(order) => {
            shopper.commit().await?;
            add_breadcrumb(
                "checkout",
                "Order placed",
                Some(&[("order_id", order.order_id.as_str())]),
            );

            let location = format!(
                "/success?order={}",
                urlencoding::encode(order.order_id.as_str())
            );
            Ok(Redirect::to(&location).into_response())
        }
        Err(CheckoutError::EmptyCart) => empty_cart_redirect(&shopper).await,
        Err(err @ CheckoutError::TermsNotAccepted) => {
            tracing::info!("Checkout submitted without accepting terms");

            let mut page = shopper.page().await?;
            page.notice = Some(Notice::danger(err.to_string()));

            let template = CheckoutTemplate {
                page,
                cart: CartView::from(&demo_shop_core::cart::read_cart(&shopper)),
                form: details,
                terms_accepted,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Order confirmation.
///
/// Shows `?order=` when given, otherwise the last order in storage.
#[instrument(skip(shopper))]
pub async fn success(
    Query(query): Query<SuccessQuery>,
    shopper: Shopper,
) -> Result<SuccessTemplate> {
    let order_id = query
        .order
        .filter(|id| !id.is_empty())
        .or_else(|| checkout::last_order(&shopper).map(|last| last.order_id.to_string()));

    Ok(SuccessTemplate {
        page: shopper.page().await?,
        order_id,
    })
}

async fn empty_cart_redirect(shopper: &Shopper) -> Result<Response> {
    shopper
        .notify(Notice::danger(CheckoutError::EmptyCart.to_string()))
        .await?;
    Ok(Redirect::to("/cart").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts_reads_terms_checkbox() {
        let form = CheckoutForm {
            firstname: "John".to_string(),
            agree: Some("on".to_string()),
            ..CheckoutForm::default()
        };

        let (details, accepted) = form.into_parts();

        assert!(accepted);
        assert_eq!(details.firstname, "John");
        assert_eq!(details.city, "");
    }

    #[test]
    fn test_into_parts_without_terms() {
        let (_, accepted) = CheckoutForm::default().into_parts();
        assert!(!accepted);
    }
}
