use super::handlers::{
    add_entry::{__path_add_entry, add_entry},
    delete_entry::{__path_delete_entry, delete_entry},
    get_day::{__path_get_day, get_day},
    get_day_progress::{__path_get_day_progress, get_day_progress},
    get_week::{__path_get_week, get_week},
};
use crate::application::{auth::auth, http::server::app_state::AppState};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_day, get_day_progress, add_entry, delete_entry, get_week))]
pub struct LedgerApiDoc;

pub fn ledger_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/ledger/days/{{date}}", state.args.server.root_path),
            get(get_day),
        )
        .route(
            &format!("{}/ledger/days/{{date}}/progress", state.args.server.root_path),
            get(get_day_progress),
        )
        .route(
            &format!("{}/ledger/days/{{date}}/entries", state.args.server.root_path),
            post(add_entry),
        )
        .route(
            &format!(
                "{}/ledger/days/{{date}}/entries/{{entry_id}}",
                state.args.server.root_path
            ),
            delete(delete_entry),
        )
        .route(
            &format!("{}/ledger/weeks/{{date}}", state.args.server.root_path),
            get(get_week),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
