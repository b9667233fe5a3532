use crate::application::http::{
    food_analysis::router::FoodAnalysisApiDoc, health::router::HealthApiDoc,
    ledger::router::LedgerApiDoc, profile::router::ProfileApiDoc,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CalTrax API"
    ),
    modifiers(&BearerAuth),
    security(("bearer" = [])),
    nest(
        (path = "/profile", api = ProfileApiDoc),
        (path = "/ledger", api = LedgerApiDoc),
        (path = "/food-analysis", api = FoodAnalysisApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
