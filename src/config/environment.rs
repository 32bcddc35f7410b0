//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Los secretos nunca tienen valor por defecto.

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("JWT_SECRET and JWT_SECRET_REFRESH must differ in production")]
    SharedJwtSecret,
}

/// Configuración del entorno
#[derive(Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub bcrypt_cost: u32,
    /// Vacío = CORS permisivo
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));

        fn parsed<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
            match value {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid { key, value }),
                None => Ok(default),
            }
        }

        let config = Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed("PORT", var("PORT"), 8080)?,
            database_url: var("DATABASE_URL")
                .or_else(|| var("DB_URL"))
                .ok_or(ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 20)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_refresh_secret: required("JWT_SECRET_REFRESH")?,
            bcrypt_cost: parsed("BCRYPT_COST", var("BCRYPT_COST"), bcrypt::DEFAULT_COST)?,
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        if !(4..=31).contains(&config.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: config.bcrypt_cost.to_string(),
            });
        }

        if config.is_production() && config.jwt_secret == config.jwt_refresh_secret {
            return Err(ConfigError::SharedJwtSecret);
        }

        Ok(config)
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Los secretos no deben aparecer en los logs
impl std::fmt::Debug for EnvironmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentConfig")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &crate::database::mask_database_url(&self.database_url))
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_secret", &"***")
            .field("jwt_refresh_secret", &"***")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}
