//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{AnalyticsService, LinkService, ResolutionService};
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteAccessLogRepository, SqliteMappingRepository};

pub type SqliteLinkService = LinkService<SqliteMappingRepository>;
pub type SqliteResolutionService =
    ResolutionService<SqliteMappingRepository, SqliteAccessLogRepository>;
pub type SqliteAnalyticsService = AnalyticsService<SqliteAccessLogRepository>;

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<SqlitePool>,
    pub link_service: Arc<SqliteLinkService>,
    pub resolution_service: Arc<SqliteResolutionService>,
    pub analytics_service: Arc<SqliteAnalyticsService>,
    /// Host segment stripped from redirect paths, e.g. `short.ly`.
    pub short_host: Option<String>,
    pub behind_proxy: bool,
}

impl AppState {
    /// Builds the state with default TTL, base URL and no host stripping.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        let mapping_repository = Arc::new(SqliteMappingRepository::new(pool.clone()));
        let access_log_repository = Arc::new(SqliteAccessLogRepository::new(pool.clone()));

        Self {
            link_service: Arc::new(LinkService::new(mapping_repository.clone())),
            resolution_service: Arc::new(ResolutionService::new(
                mapping_repository,
                access_log_repository.clone(),
            )),
            analytics_service: Arc::new(AnalyticsService::new(access_log_repository)),
            pool,
            short_host: None,
            behind_proxy: false,
        }
    }

    /// Builds the state from a validated [`Config`].
    pub fn from_config(pool: Arc<SqlitePool>, config: &Config) -> Self {
        let mapping_repository = Arc::new(SqliteMappingRepository::new(pool.clone()));
        let access_log_repository = Arc::new(SqliteAccessLogRepository::new(pool.clone()));

        let link_service = LinkService::new(mapping_repository.clone())
            .with_default_ttl(config.default_ttl())
            .with_base_url(config.base_url.clone());

        Self {
            link_service: Arc::new(link_service),
            resolution_service: Arc::new(ResolutionService::new(
                mapping_repository,
                access_log_repository.clone(),
            )),
            analytics_service: Arc::new(AnalyticsService::new(access_log_repository)),
            pool,
            short_host: config.short_host.clone(),
            behind_proxy: config.behind_proxy,
        }
    }

    pub fn with_short_host(mut self, short_host: impl Into<String>) -> Self {
        self.short_host = Some(short_host.into());
        self
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}
