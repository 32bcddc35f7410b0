use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::models::auth::{Claims, TokenPair};
use crate::models::User;
use crate::utils::{AppError, AppResult};

/// Tipo de token: cada uno se firma con su propia clave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Configuración JWT
#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub algorithm: Algorithm,
    pub access_token_duration: Duration,
    pub refresh_token_duration: Duration,
}

impl JwtConfig {
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::minutes(30), // 30 minutos
            refresh_token_duration: Duration::days(30),   // 30 días
        }
    }
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Servicio JWT
pub struct JwtService {
    config: JwtConfig,
    access_keys: KeyPair,
    refresh_keys: KeyPair,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let access_keys = KeyPair::from_secret(&config.access_secret);
        let refresh_keys = KeyPair::from_secret(&config.refresh_secret);

        Self {
            config,
            access_keys,
            refresh_keys,
        }
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    fn duration(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_token_duration,
            TokenKind::Refresh => self.config.refresh_token_duration,
        }
    }

    fn sign(&self, kind: TokenKind, sub: &str, username: &str, now: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims {
            sub: sub.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.duration(kind)).timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.keys(kind).encoding)
            .map_err(|e| AppError::Jwt(format!("Error generating {:?} token: {}", kind, e)))
    }

    pub fn generate_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        self.generate_token_pair_at(user, Utc::now())
    }

    pub fn generate_token_pair_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<TokenPair> {
        let sub = user.meta.id.to_string();
        Ok(TokenPair {
            access_token: self.sign(TokenKind::Access, &sub, &user.username, now)?,
            refresh_token: self.sign(TokenKind::Refresh, &sub, &user.username, now)?,
        })
    }

    /// Verifica firma y expiración (sin margen) respecto a `now`
    pub fn verify_at(&self, token: &str, kind: TokenKind, now: DateTime<Utc>) -> AppResult<Claims> {
        let mut validation = Validation::new(self.config.algorithm);
        // La expiración se comprueba abajo contra `now`
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Invalid {:?} token: {}", kind, e);
                AppError::Unauthorized("invalid or expired token".to_string())
            })?;

        if now.timestamp() >= claims.exp {
            debug!("Expired {:?} token for {}", kind, claims.username);
            return Err(AppError::Unauthorized("invalid or expired token".to_string()));
        }
        Ok(claims)
    }

    pub fn validate_access_token(&self, token: &str) -> bool {
        self.validate_access_token_at(token, Utc::now())
    }

    pub fn validate_access_token_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verify_at(token, TokenKind::Access, now).is_ok()
    }

    /// Genera un nuevo access token para el mismo sujeto
    pub fn refresh_access_token(&self, refresh_token: &str) -> AppResult<String> {
        self.refresh_access_token_at(refresh_token, Utc::now())
    }

    pub fn refresh_access_token_at(&self, refresh_token: &str, now: DateTime<Utc>) -> AppResult<String> {
        let claims = self.verify_at(refresh_token, TokenKind::Refresh, now)?;
        self.sign(TokenKind::Access, &claims.sub, &claims.username, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::tests::valid_registration;

    fn service() -> JwtService {
        JwtService::new(JwtConfig::new("access-secret", "refresh-secret"))
    }

    fn user() -> User {
        let mut user = User::from_registration(valid_registration(), "hash".to_string());
        user.meta.id = 7;
        user
    }

    #[test]
    fn test_access_token_expires_after_thirty_minutes() {
        let jwt = service();
        let t = Utc::now();
        let pair = jwt.generate_token_pair_at(&user(), t).unwrap();

        assert!(jwt.validate_access_token_at(&pair.access_token, t + Duration::minutes(29)));
        assert!(!jwt.validate_access_token_at(&pair.access_token, t + Duration::minutes(31)));
    }

    #[test]
    fn test_refresh_token_expires_after_thirty_days() {
        let jwt = service();
        let t = Utc::now();
        let pair = jwt.generate_token_pair_at(&user(), t).unwrap();

        let later = t + Duration::days(29);
        let access = jwt.refresh_access_token_at(&pair.refresh_token, later).unwrap();
        let claims = jwt.verify_at(&access, TokenKind::Access, later).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "karim16");

        let err = jwt
            .refresh_access_token_at(&pair.refresh_token, t + Duration::days(31))
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_keys_are_not_interchangeable() {
        let jwt = service();
        let t = Utc::now();
        let pair = jwt.generate_token_pair_at(&user(), t).unwrap();

        assert!(!jwt.validate_access_token_at(&pair.refresh_token, t));
        assert!(jwt.refresh_access_token_at(&pair.access_token, t).is_err());
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert!(!service().validate_access_token("not.a.jwt"));
    }
}
