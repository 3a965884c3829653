use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use folio_application::IdentityConfig;
use folio_core::{ActorId, AppError};
use folio_domain::{Actor, Role};
use tracing_subscriber::EnvFilter;

const DEFAULT_MOCK_ACTOR_ID: &str = "dev-admin";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL document store settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database: Option<DatabaseConfig>,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub identity: IdentityConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database = match optional_non_empty_env("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: database_max_connections()?,
            }),
            None => None,
        };
        if migrate_only && database.is_none() {
            return Err(AppError::Validation(
                "DATABASE_URL is required to run migrations".to_owned(),
            ));
        }

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let identity = match env::var("FOLIO_IDENTITY_MODE")
            .unwrap_or_else(|_| "headers".to_owned())
            .as_str()
        {
            "headers" => IdentityConfig::TrustedHeaders,
            "mock" => {
                let actor_id = optional_non_empty_env("FOLIO_MOCK_ACTOR_ID")
                    .unwrap_or_else(|| DEFAULT_MOCK_ACTOR_ID.to_owned());
                let role = match optional_non_empty_env("FOLIO_MOCK_ACTOR_ROLE") {
                    Some(value) => Role::from_str(value.as_str()).map_err(|error| {
                        AppError::Validation(format!("invalid FOLIO_MOCK_ACTOR_ROLE: {error}"))
                    })?,
                    None => Role::Admin,
                };

                IdentityConfig::Mock {
                    actor: Actor::new(ActorId::new(actor_id)?, role),
                }
            }
            other => {
                return Err(AppError::Validation(format!(
                    "FOLIO_IDENTITY_MODE must be either 'headers' or 'mock', got '{other}'"
                )));
            }
        };

        Ok(Self {
            migrate_only,
            database,
            frontend_url,
            api_host,
            api_port,
            identity,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn database_max_connections() -> Result<u32, AppError> {
    match optional_non_empty_env("DATABASE_MAX_CONNECTIONS") {
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|connections| *connections > 0)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "DATABASE_MAX_CONNECTIONS must be a positive integer, got '{value}'"
                ))
            }),
        None => Ok(DEFAULT_DATABASE_MAX_CONNECTIONS),
    }
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
