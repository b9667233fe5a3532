use super::handlers::analyze_food_image::{__path_analyze_food_image, analyze_food_image};
use crate::application::{auth::auth, http::server::app_state::AppState};
use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_food_image))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/food-analysis/image", state.args.server.root_path),
            post(analyze_food_image),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
