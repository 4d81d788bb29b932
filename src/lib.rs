use axum::{middleware, routing::get, routing::post, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pager;
pub mod quiz;
pub mod state;
pub mod store;

use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Project route groups
        .merge(trivia_routes())
        .merge(bar_routes(state.clone()))
        .merge(booking_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn trivia_routes() -> Router<AppState> {
    use axum::routing::delete;
    use handlers::trivia;

    Router::new()
        .route("/trivia/categories", get(trivia::list_categories))
        .route("/trivia/categories/:id/questions", get(trivia::questions_by_category))
        .route(
            "/trivia/questions",
            get(trivia::list_questions).post(trivia::create_or_search_question),
        )
        .route("/trivia/questions/:id", delete(trivia::delete_question))
        .route("/trivia/quizzes", post(trivia::play_quiz))
}

fn bar_routes(state: AppState) -> Router<AppState> {
    use handlers::bar;

    Router::new()
        .route("/bar/drinks", get(bar::list_drinks).post(bar::add_drink))
        .route("/bar/drinks-detail", get(bar::drink_detail))
        .route("/bar/drinks/:id", axum::routing::patch(bar::edit_drink).delete(bar::delete_drink))
        // Policy table runs before any handler in this group
        .route_layer(middleware::from_fn_with_state(state, auth::bar_policy_middleware))
}

fn booking_routes() -> Router<AppState> {
    use handlers::booking;

    Router::new()
        .route("/booking/venues", get(booking::list_venues).post(booking::create_venue))
        .route("/booking/venues/search", post(booking::search_venues))
        .route(
            "/booking/venues/:id",
            get(booking::show_venue).put(booking::edit_venue).delete(booking::delete_venue),
        )
        .route("/booking/artists", get(booking::list_artists).post(booking::create_artist))
        .route("/booking/artists/search", post(booking::search_artists))
        .route(
            "/booking/artists/:id",
            get(booking::show_artist).put(booking::edit_artist).delete(booking::delete_artist),
        )
        .route("/booking/shows", get(booking::list_shows).post(booking::create_show))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Campus API",
            "version": version,
            "description": "Coursework REST backends: trivia, drinks bar, booking",
            "endpoints": {
                "home": "/ (public)",
                "trivia": "/trivia/categories, /trivia/questions[?page], /trivia/quizzes",
                "bar": "/bar/drinks (public), /bar/drinks-detail, /bar/drinks/:id (permission-gated)",
                "booking": "/booking/venues, /booking/artists, /booking/shows",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
