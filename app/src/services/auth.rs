//! Authentication service for the mock sign-in flows
//!
//! Passwords are verified against bcrypt hashes held in the mock user
//! store. Verification codes are single-use: a code is invalidated by a
//! successful check, by expiry, and by the fifth failed attempt.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::store::{UserRepository, VerificationCode, VerificationCodeRepository};
use shared::models::User;

/// Codes expire this long after being issued
const CODE_TTL_MINUTES: i64 = 10;

/// Failed checks allowed before the code is invalidated
const MAX_CODE_ATTEMPTS: u32 = 5;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codes: Arc<dyn VerificationCodeRepository>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codes: Arc<dyn VerificationCodeRepository>,
    ) -> Self {
        Self { users, codes }
    }

    /// Whether an account exists for this email
    pub async fn check_email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.users.find_by_email(email).await?.is_some())
    }

    /// First stage of the code sign-in flow: resolve the account
    pub async fn login(&self, email: &str) -> AppResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)
    }

    /// Password sign-in
    pub async fn login_with_password(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let Some(ref hash) = user.password_hash else {
            return Err(AppError::InvalidCredentials);
        };
        let verified = bcrypt::verify(password, hash)
            .map_err(|e| AppError::Internal(format!("password verification failed: {}", e)))?;
        if !verified {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user = %user.email, "signed in with password");
        Ok(user)
    }

    /// Issue a fresh 6-digit verification code for an account. Replaces any
    /// code already pending for the email and resets the attempt counter.
    pub async fn generate_verification_code(&self, email: &str) -> AppResult<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.codes
            .upsert(VerificationCode {
                email: user.email.clone(),
                code: code.clone(),
                expires_at: Utc::now() + Duration::minutes(CODE_TTL_MINUTES),
                attempts: 0,
            })
            .await?;

        // A real backend would email this; the mock hands it back
        tracing::debug!(user = %user.email, "verification code issued");
        Ok(code)
    }

    /// Check a verification code and sign the account in. The code is
    /// removed on success, on expiry, and on the final failed attempt.
    pub async fn verify_code(&self, email: &str, code: &str) -> AppResult<User> {
        let pending = self
            .codes
            .find(email)
            .await?
            .ok_or(AppError::NoVerificationCode)?;

        if Utc::now() > pending.expires_at {
            self.codes.remove(email).await?;
            return Err(AppError::VerificationCodeExpired);
        }

        if pending.code != code {
            let attempts = pending.attempts + 1;
            if attempts >= MAX_CODE_ATTEMPTS {
                self.codes.remove(email).await?;
                return Err(AppError::TooManyAttempts);
            }
            self.codes
                .upsert(VerificationCode {
                    attempts,
                    ..pending
                })
                .await?;
            return Err(AppError::InvalidVerificationCode {
                attempts_remaining: MAX_CODE_ATTEMPTS - attempts,
            });
        }

        // Single use
        self.codes.remove(email).await?;
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        tracing::info!(user = %user.email, "signed in with verification code");
        Ok(user)
    }
}
