//! Integration tests for Demo Shop.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`.
//! [`TestClient`] plays the browser: it keeps the session cookie between
//! requests so cart and login state carry over, the same way the shopper's
//! storage would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p demo-shop-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use demo_shop_core::Catalog;
use demo_shop_storefront::{app, config::StorefrontConfig, state::AppState};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// A response with the body already collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// A cookie-keeping client for the storefront router.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Client for a storefront with the demo catalog and local config.
    pub fn new() -> Self {
        Self {
            app: app(AppState::new(StorefrontConfig::local(), Catalog::demo())),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri);
        self.send(request, Body::empty()).await
    }

    /// POST an urlencoded form; `fields` are encoded as given.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(body)).await
    }

    /// GET a page and follow one redirect.
    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        let location = response.location.clone().unwrap();
        self.get(&location).await
    }

    /// Add a catalog product by name, asserting the redirect back.
    pub async fn add_to_cart(&mut self, name: &str) {
        let response = self.post_form("/cart/add", &[("name", name)]).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "adding {name}");
    }

    /// Current cart badge count from the count fragment.
    pub async fn cart_count(&mut self) -> u32 {
        let body = self.get("/cart/count").await.body;
        body.split('>')
            .nth(1)
            .and_then(|rest| rest.split('<').next())
            .unwrap()
            .parse()
            .unwrap()
    }

    async fn send(
        &mut self,
        mut request: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
