//! User (usuario) model and JWT claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

use super::enums::Role;

/// Full user row from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id_usuario: i32,
    pub nombre: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub rol: Role,
}

/// User representation returned to API callers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub id_usuario: i32,
    pub nombre: String,
    pub email: String,
    pub rol: Role,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id_usuario: user.id_usuario,
            nombre: user.nombre,
            email: user.email,
            rol: user.rol,
        }
    }
}

/// Register request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    #[validate(email(message = "Formato de email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    pub rol: Role,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub nombre: String,
    pub rol: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Check if user holds the administrative role
    pub fn is_admin(&self) -> bool {
        self.rol == Role::Administrador
    }

    /// Require the administrative role for mutating endpoints
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Se requiere el rol de Administrador para esta acción".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(rol: Role, exp_offset: i64) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "ana@orquesta.org".to_string(),
            user_id: 7,
            nombre: "Ana".to_string(),
            rol,
            exp: now + exp_offset,
            iat: now,
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = claims(Role::Administrador, 3600);
        let token = claims.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();

        assert_eq!(parsed.user_id, 7);
        assert_eq!(parsed.sub, "ana@orquesta.org");
        assert_eq!(parsed.rol, Role::Administrador);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = claims(Role::Administrador, 3600).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = claims(Role::Administrador, -3600).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "secret").is_err());
    }

    #[test]
    fn only_administrators_pass_the_write_gate() {
        assert!(claims(Role::Administrador, 3600).require_admin().is_ok());
        assert!(claims(Role::Consulta, 3600).require_admin().is_err());
    }
}
