use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::identity::IdentityClient;
use crate::identity::cache::SessionCache;
use crate::records::resolver::EventResolver;
use crate::retry::RetryPolicy;

pub type AppState = Arc<State>;

#[derive(Clone, Debug)]
pub struct StateConfig {
    pub identity_base_url: String,
    pub session_ttl: Duration,
    pub retry: RetryPolicy,
}

impl Default for StateConfig {
    fn default() -> Self {
        StateConfig {
            identity_base_url: "http://localhost:8787".to_string(),
            session_ttl: Duration::from_secs(240),
            retry: RetryPolicy::default(),
        }
    }
}

pub struct State {
    pub db: DatabaseConnection,
    pub resolver: EventResolver,
    pub identity: IdentityClient,
    pub sessions: SessionCache,
    pub retry: RetryPolicy,
}

impl State {
    pub async fn connect(database_url: &str, config: StateConfig) -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(10)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(false);

        let db = Database::connect(opt).await?;
        Ok(Self::with_connection(db, config))
    }

    /// Wires the state over an existing connection; lets tests run against an
    /// in-memory database.
    pub fn with_connection(db: DatabaseConnection, config: StateConfig) -> Self {
        State {
            resolver: EventResolver::new(db.clone(), config.retry),
            identity: IdentityClient::new(config.identity_base_url),
            sessions: SessionCache::new(config.session_ttl),
            retry: config.retry,
            db,
        }
    }
}
