use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod error;
pub mod handlers {
    pub mod locale_middleware;
    pub mod page_handlers;
}
pub mod models {
    pub mod locale;
}
pub mod pages {
    pub mod landing;
}
pub mod utils {
    pub mod locale_detection;
    pub mod locale_routing;
    pub mod messages;
}

use config::Config;
use error::AppError;
use handlers::{locale_middleware, page_handlers};
use utils::messages::Catalogs;

pub struct AppState {
    pub config: Config,
    pub catalogs: Catalogs,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let catalogs = Catalogs::load(&config.locale.locales, config.locale.fallback_locale)?;
        Ok(Self { config, catalogs })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(Config::from_env()?)
    }
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn app(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(page_handlers::landing_page))
        .fallback(page_handlers::not_found_page)
        .with_state(state.clone());
    // Locale resolution wraps the page router so its rewrites are routed.
    let pages = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::VARY,
            HeaderValue::from_static("Cookie, Accept-Language"),
        ))
        .layer(middleware::from_fn_with_state(state.clone(), locale_middleware::resolve_locale))
        .service(page_routes);

    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/locale/{code}", get(page_handlers::switch_locale))
        .route_service("/robots.txt", ServeFile::new(static_dir.join("robots.txt")))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback_service(pages)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
