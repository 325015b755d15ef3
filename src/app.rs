use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{AppConfig, CorsConfig},
    database,
    error::{AppError, Result},
    routes,
    store::{CatalogStore, PgCatalogStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: CatalogStore + 'static,
    {
        Self {
            store: Arc::new(store),
        }
    }
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;

    if config.database.seed {
        database::seed::seed_postgres(&pool).await?;
    }

    let state = AppState::new(PgCatalogStore::new(pool));
    router(state, &config.cors)
}

pub fn router(state: AppState, cors: &CorsConfig) -> Result<Router> {
    tracing::info!("Serving catalog from {} store", state.store.backend_tag());

    let app = routes::create_router()
        .layer(cors_layer(cors)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        return Ok(cors.allow_origin(Any));
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(cors.allow_origin(allowed_origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://ok.test".to_string(), "bad\norigin".to_string()],
        };
        assert!(matches!(cors_layer(&config), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn wildcard_origin_is_accepted() {
        let config = CorsConfig {
            allowed_origins: vec!["*".to_string()],
        };
        assert!(cors_layer(&config).is_ok());
    }
}
