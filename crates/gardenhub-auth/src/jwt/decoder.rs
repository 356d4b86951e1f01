//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use gardenhub_core::config::AuthConfig;
use gardenhub_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens and extracts their claims.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthenticated("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid token signature")
                    }
                    _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::jwt::JwtEncoder;
    use gardenhub_core::ErrorKind;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let cfg = config("test-secret");
        let user_id = Uuid::new_v4();
        let (token, _) = JwtEncoder::new(&cfg)
            .issue(user_id, "b@example.com", "bob")
            .unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "b@example.com");
        assert_eq!(claims.username, "bob");
    }

    #[test]
    fn test_wrong_secret_is_unauthenticated() {
        let (token, _) = JwtEncoder::new(&config("one"))
            .issue(Uuid::new_v4(), "b@example.com", "bob")
            .unwrap();

        let err = JwtDecoder::new(&config("two")).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_minutes: 0,
            leeway_seconds: 0,
        };
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "b@example.com".to_string(),
            username: "bob".to_string(),
            iat: 0,
            exp: 1,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = JwtDecoder::new(&cfg).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
        assert!(err.message.contains("expired"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&config("s")).decode("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }
}
