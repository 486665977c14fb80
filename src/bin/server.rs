//! REST API server for card validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! cardcheck-server
//!
//! # With custom port
//! cardcheck-server --port 8080
//!
//! # With a config file
//! CARDCHECK_CONFIG=cardcheck.toml cardcheck-server
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use cardcheck::{CardDetails, Clock, Config, Field, ValidationError, Validator};

const CONFIG_ENV: &str = "CARDCHECK_CONFIG";

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Validation API",
        version = "0.1.0",
        description = "Validates cardholder name, card number, CVC and expiry date. Supports Mastercard, Visa and American Express.",
        license(name = "MIT")
    ),
    tags(
        (name = "Validation", description = "Card validation endpoints"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(validate_card, health),
    components(schemas(HealthResponse))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
struct ValidationParams {
    /// Cardholder name, letters separated by single spaces
    #[serde(default)]
    card_owner: String,
    /// Card number, optionally separated by spaces
    #[serde(default)]
    credit_card_number: String,
    /// Expiry date in MM/yyyy format
    #[serde(default)]
    issue_date: String,
    /// Card verification code (3 digits, 4 for American Express)
    #[serde(default, rename = "CVC", alias = "cvc")]
    cvc: String,
}

impl From<ValidationParams> for CardDetails {
    fn from(params: ValidationParams) -> Self {
        CardDetails::new(
            params.card_owner,
            params.credit_card_number,
            params.issue_date,
            params.cvc,
        )
    }
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Validate a card
///
/// Returns the card network on success.
#[utoipa::path(
    post,
    path = "/api/validation",
    params(ValidationParams),
    responses(
        (status = 200, description = "Card accepted; body is the network name", body = String),
        (status = 400, description = "Card rejected; body explains why", body = String)
    ),
    tag = "Validation"
)]
async fn validate_card(
    State(validator): State<Arc<Validator>>,
    Query(params): Query<ValidationParams>,
) -> Result<String, (StatusCode, &'static str)> {
    respond(&validator, &params.into())
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn respond<C: Clock>(
    validator: &Validator<C>,
    details: &CardDetails,
) -> Result<String, (StatusCode, &'static str)> {
    validator
        .validate(details)
        .map(|network| network.name().to_string())
        .map_err(|err| (StatusCode::BAD_REQUEST, rejection_message(&err)))
}

/// Maps a validation failure to the message returned to clients.
fn rejection_message(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::MissingField(Field::CardOwner) => "Card owner must be filled in.",
        ValidationError::InvalidNameCharacters => {
            "Card owner contains incorrect information. It can not contain special characters or numbers."
        }
        ValidationError::MissingField(Field::Cvc) | ValidationError::InvalidFormat(Field::Cvc) => {
            "CVC must be filled in."
        }
        ValidationError::UnrecognizedNetwork => {
            "This type of credit card is not valid. Only Master Card, Visa and American Express are supported."
        }
        ValidationError::ChecksumFailed
        | ValidationError::InvalidFormat(Field::CardNumber | Field::CardOwner) => {
            "Credit card information is not valid."
        }
        ValidationError::CvvLengthMismatch { .. } => "CVC is not valid.",
        ValidationError::MissingField(Field::CardNumber) => "Creditcard number must be filled in.",
        ValidationError::InvalidFormat(Field::IssueDate) | ValidationError::ExpiryOutOfRange => {
            "Credit card issuedate is not valid. Please use format MM/yyyy or check its validity."
        }
        ValidationError::MissingField(Field::IssueDate) => {
            "Creditcard expiry date must be filled in."
        }
    }
}

/// Reads `--port <n>` from the command line, if present.
fn port_override() -> Result<Option<u16>, Box<dyn Error>> {
    match std::env::args().skip_while(|a| a != "--port").nth(1) {
        Some(port) => Ok(Some(port.parse()?)),
        None => Ok(None),
    }
}

fn router(validator: Arc<Validator>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/validation", post(validate_card))
        .route("/health", get(health))
        .with_state(validator)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let mut config = Config::load_or_default(config_path.as_deref())?;
    if let Some(port) = port_override()? {
        config.server.port = port;
    }

    let validator = Arc::new(Validator::with_config(config.validator));
    let app = router(validator);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server on http://{}", listener.local_addr()?);
    tracing::info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        "localhost",
        config.server.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardcheck::FixedClock;
    use chrono::NaiveDate;

    fn validator() -> Validator<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Validator::new().with_clock(FixedClock(now))
    }

    fn call(owner: &str, number: &str, date: &str, cvc: &str) -> Result<String, (StatusCode, &'static str)> {
        respond(&validator(), &CardDetails::new(owner, number, date, cvc))
    }

    fn rejected(message: &'static str) -> Result<String, (StatusCode, &'static str)> {
        Err((StatusCode::BAD_REQUEST, message))
    }

    #[test]
    fn test_accepted_returns_network_name() {
        assert_eq!(
            call("Robin Demeulenaere", "4242 4242 4242 4242", "11/2022", "123"),
            Ok("Visa".to_string())
        );
        assert_eq!(
            call("Robin Demeulenaere", "5555 5555 5555 4444", "11/2022", "123"),
            Ok("MasterCard".to_string())
        );
        assert_eq!(
            call("Robin Demeulenaere", "3782 822463 10005", "11/2022", "1234"),
            Ok("AmericanExpress".to_string())
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            call("", "4242424242424242", "11/2022", "123"),
            rejected("Card owner must be filled in.")
        );
        assert_eq!(
            call("R@b1n Dem3ulenaere 12351gtest", "4242424242424242", "11/2022", "123"),
            rejected("Card owner contains incorrect information. It can not contain special characters or numbers.")
        );
        assert_eq!(
            call("Robin", "4242424242424242", "11/2022", ""),
            rejected("CVC must be filled in.")
        );
        assert_eq!(
            call("Robin", "", "11/2022", "123"),
            rejected("Creditcard number must be filled in.")
        );
        assert_eq!(
            call("Robin", "6011111111111117", "11/2022", "123"),
            rejected("This type of credit card is not valid. Only Master Card, Visa and American Express are supported.")
        );
        assert_eq!(
            call("Robin", "4242424242424243", "11/2022", "123"),
            rejected("Credit card information is not valid.")
        );
        assert_eq!(
            call("Robin", "3782 822463 10005", "11/2022", "123"),
            rejected("CVC is not valid.")
        );
        assert_eq!(
            call("Robin", "4242424242424242", "", "123"),
            rejected("Creditcard expiry date must be filled in.")
        );
        assert_eq!(
            call("Robin", "4242424242424242", "13/2022", "123"),
            rejected("Credit card issuedate is not valid. Please use format MM/yyyy or check its validity.")
        );
        assert_eq!(
            call("Robin", "4242424242424242", "11/2019", "123"),
            rejected("Credit card issuedate is not valid. Please use format MM/yyyy or check its validity.")
        );
    }

    #[test]
    fn test_separators_other_than_spaces_fail_checksum_stage() {
        assert_eq!(
            rejection_message(&ValidationError::InvalidFormat(Field::CardNumber)),
            "Credit card information is not valid."
        );
        assert_eq!(
            call("Robin", "4242-4242-4242-4242", "11/2022", "123"),
            rejected("Credit card information is not valid.")
        );
    }

    #[test]
    fn test_params_convert_to_details() {
        let params: ValidationParams = serde_json::from_str(
            r#"{"cardOwner":"Robin","creditCardNumber":"4242424242424242","issueDate":"11/2022","CVC":"123"}"#,
        )
        .unwrap();
        let details = CardDetails::from(params);
        assert_eq!(details.card_owner, "Robin");
        assert_eq!(details.cvc, "123");
        assert_eq!(respond(&validator(), &details), Ok("Visa".to_string()));
    }
}
