//! Demo login and account page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use demo_shop_core::{LoginError, account, checkout};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::models::Notice;
use crate::shopper::{PageContext, Shopper};
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub email: String,
    pub error: Option<String>,
}

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account/show.html")]
pub struct AccountTemplate {
    pub page: PageContext,
    pub email: String,
    pub last_order_id: Option<String>,
}

/// Display the login form, or go straight to the account page when logged in.
#[instrument(skip(shopper))]
pub async fn login_page(shopper: Shopper) -> Result<Response> {
    if account::is_logged_in(&shopper) {
        return Ok(Redirect::to("/account").into_response());
    }

    Ok(LoginTemplate {
        page: shopper.page().await?,
        email: String::new(),
        error: None,
    }
    .into_response())
}

/// Check the demo credentials and set the login flag.
#[instrument(skip(state, shopper))]
pub async fn login(
    State(state): State<AppState>,
    mut shopper: Shopper,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state
        .config()
        .demo_credentials
        .verify(&form.email, &form.password)
    {
        Ok(email) => {
            account::log_in(&mut shopper, &email);
            set_sentry_user(email.as_str());
            tracing::info!(email = %email, "Shopper logged in");

            shopper
                .notify(Notice::success("You are now logged in."))
                .await?;
            shopper.commit().await?;
            Ok(Redirect::to("/account").into_response())
        }
        Err(err) => {
            tracing::info!(reason = %err, "Login rejected");

            let template = LoginTemplate {
                page: shopper.page().await?,
                email: form.email,
                error: Some(login_error_message(&err).to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, template).into_response())
        }
    }
}

/// Clear the login flag.
#[instrument(skip(shopper))]
pub async fn logout(mut shopper: Shopper) -> Result<Redirect> {
    account::log_out(&mut shopper);
    clear_sentry_user();

    shopper
        .notify(Notice::info("You have been logged out."))
        .await?;
    shopper.commit().await?;
    Ok(Redirect::to("/products"))
}

/// Account overview. Requires the login flag.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<Response> {
    let Some(email) = account::user_email(&shopper).filter(|_| account::is_logged_in(&shopper))
    else {
        return Ok(Redirect::to("/login").into_response());
    };

    Ok(AccountTemplate {
        page: shopper.page().await?,
        email,
        last_order_id: checkout::last_order(&shopper).map(|last| last.order_id.to_string()),
    }
    .into_response())
}

/// Alert text for a rejected login.
const fn login_error_message(err: &LoginError) -> &'static str {
    match err {
        LoginError::MissingCredentials => "Warning: E-Mail Address and Password are required.",
        LoginError::InvalidEmail(_) | LoginError::InvalidCredentials => {
            "Warning: No match for E-Mail Address and/or Password."
        }
    }
}

#[cfg(test)]
mod tests {
    use demo_shop_core::EmailError;

    use super::*;

    #[test]
    fn test_login_error_message() {
        assert_eq!(
            login_error_message(&LoginError::InvalidCredentials),
            login_error_message(&LoginError::InvalidEmail(EmailError::Empty))
        );
        assert!(login_error_message(&LoginError::MissingCredentials).contains("required"));
    }

    #[test]
    fn test_login_form_debug_redacts_password() {
        let form = LoginForm {
            email: "test@example.com".to_string(),
            password: "test123".to_string(),
        };
        let debug = format!("{form:?}");
        assert!(debug.contains("test@example.com"));
        assert!(!debug.contains("test123"));
    }
}
