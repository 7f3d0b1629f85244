//! Authentication service: registration, credential verification and JWT
//! issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{LoginUser, RegisterUser, User, UserClaims},
};
use crate::repository::Repository;

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&data.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = self.hash_password(&data.password)?;

        self.repository
            .users
            .create(&data.nombre, &data.email, &password_hash, data.rol)
            .await
    }

    /// Authenticate by email and password, returning a signed token and the
    /// user. Credential failures are indistinguishable to the caller.
    pub async fn login(&self, data: &LoginUser) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(&data.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Email o contraseña inválidos".to_string()))?;

        if !self.verify_password(&user, &data.password)? {
            return Err(AppError::Authentication("Email o contraseña inválidos".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Create a JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id_usuario,
            nombre: user.nombre.clone(),
            rol: user.rol,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a password against the stored argon2 hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
