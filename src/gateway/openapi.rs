//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8090/docs`
//! - OpenAPI JSON: `http://localhost:8090/api-docs/openapi.json`

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::admin::{ExchangeRatesData, SetExchangeRatesRequest};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::SetRatesData;

/// Bearer admin token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Admin token: Bearer {token}. Only enforced when admin.token is configured.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fee Exchange Rate Admin API",
        version = "1.0.0",
        description = "Administration of the exchange rates used to value fees paid in non-reference assets.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8090", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::rates::get_fee_exchange_rates,
        crate::gateway::handlers::rates::set_fee_exchange_rates,
    ),
    components(
        schemas(
            HealthResponse,
            ExchangeRatesData,
            SetExchangeRatesRequest,
            SetRatesData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Exchange Rates", description = "Fee exchange rate administration (admin token)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
