//! Router construction.

use crate::domain::config::{validate_route, ConfigError};
use crate::handler::{handle_webhook, WebhookState};
use crate::headers::{CLIENT_LIBRARY, SET_COMPATIBILITY_DATE};
use crate::{client_version, COMPATIBILITY_DATE};
use axum::{
    http::{HeaderName, HeaderValue},
    routing::post,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::warn;

/// Mount the webhook handler on `route`.
///
/// Every response from this router, rejections included, carries
/// `X-Set-Compatibility-Date` and `X-Client-Library`. Merge the result into
/// an application router, or serve it on its own via
/// [`crate::WebhookServer`].
///
/// # Errors
///
/// [`ConfigError::InvalidRoute`] if `route` does not start with `/`.
pub fn webhook_router(state: WebhookState, route: &str) -> Result<Router, ConfigError> {
    validate_route(route)?;

    let compatibility_date = HeaderValue::from_str(state.compatibility_date()).unwrap_or_else(|_| {
        warn!(
            compatibility_date = state.compatibility_date(),
            "Compatibility date is not a valid header value; announcing the default"
        );
        HeaderValue::from_static(COMPATIBILITY_DATE)
    });
    let client_library = HeaderValue::from_str(&client_version())
        .unwrap_or_else(|_| HeaderValue::from_static("freestuff-rs"));

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(SET_COMPATIBILITY_DATE),
            compatibility_date,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(CLIENT_LIBRARY),
            client_library,
        ));

    Ok(Router::new()
        .route(route, post(handle_webhook))
        .layer(middleware)
        .with_state(state))
}
