//! Authentication and verification-code tests
//!
//! Codes are single-use with a 10-minute expiry and five attempts; every
//! terminal outcome (success, expiry, exhaustion) invalidates the code.

use std::sync::Arc;

use chrono::{Duration, Utc};
use proptest::prelude::*;

use beet_guru_app::store::{
    Latency, MemoryStore, VerificationCode, VerificationCodeRepository,
};
use beet_guru_app::{AppContext, AppError};
use shared::models::AccountType;

const JOHN: &str = "john@beetguru.nz";

fn store_and_context() -> (Arc<MemoryStore>, AppContext) {
    let store = Arc::new(MemoryStore::seeded(Latency::none()));
    let context = AppContext::new(store.clone());
    (store, context)
}

/// A six-digit code different from the one issued
fn wrong_code(code: &str) -> &'static str {
    if code == "000000" {
        "111111"
    } else {
        "000000"
    }
}

// ============================================================================
// Password sign-in
// ============================================================================

#[tokio::test]
async fn test_login_with_password() {
    let (_, ctx) = store_and_context();
    let user = ctx
        .auth
        .login_with_password(JOHN, "beetguru2025")
        .await
        .unwrap();
    assert_eq!(user.account_type, AccountType::Farmer);
    assert!(user.has_password);
}

#[tokio::test]
async fn test_login_with_wrong_password_rejected() {
    let (_, ctx) = store_and_context();
    let denied = ctx.auth.login_with_password(JOHN, "not-the-password").await;
    match denied {
        Err(e) => assert_eq!(e.to_string(), "Invalid credentials"),
        Ok(_) => panic!("signed in with a wrong password"),
    }
}

#[tokio::test]
async fn test_login_with_unknown_email_rejected() {
    let (_, ctx) = store_and_context();
    let denied = ctx
        .auth
        .login_with_password("nobody@beetguru.nz", "whatever1")
        .await;
    assert!(matches!(denied, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_passwordless_account_cannot_use_password_login() {
    let (_, ctx) = store_and_context();
    // The admin persona has no password set
    let denied = ctx
        .auth
        .login_with_password("admin@beetguru.nz", "anything1")
        .await;
    assert!(matches!(denied, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_check_email_exists() {
    let (_, ctx) = store_and_context();
    assert!(ctx.auth.check_email_exists(JOHN).await.unwrap());
    assert!(!ctx
        .auth
        .check_email_exists("nobody@beetguru.nz")
        .await
        .unwrap());
}

// ============================================================================
// Verification codes
// ============================================================================

#[tokio::test]
async fn test_verification_code_signs_in_once() {
    let (_, ctx) = store_and_context();
    let code = ctx.auth.generate_verification_code(JOHN).await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let user = ctx.auth.verify_code(JOHN, &code).await.unwrap();
    assert_eq!(user.email, JOHN);

    // Single use: the same code no longer exists
    let replay = ctx.auth.verify_code(JOHN, &code).await;
    match replay {
        Err(e) => assert_eq!(
            e.to_string(),
            "No verification code found. Please request a new code."
        ),
        Ok(_) => panic!("verification code was accepted twice"),
    }
}

#[tokio::test]
async fn test_expired_code_is_invalidated() {
    let (store, ctx) = store_and_context();
    VerificationCodeRepository::upsert(
        store.as_ref(),
        VerificationCode {
            email: JOHN.to_string(),
            code: "123456".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
            attempts: 0,
        },
    )
    .await
    .unwrap();

    let expired = ctx.auth.verify_code(JOHN, "123456").await;
    match expired {
        Err(e) => assert_eq!(
            e.to_string(),
            "Verification code has expired. Please request a new code."
        ),
        Ok(_) => panic!("expired code accepted"),
    }

    // Expiry removed the code entirely
    let gone = ctx.auth.verify_code(JOHN, "123456").await;
    assert!(matches!(gone, Err(AppError::NoVerificationCode)));
}

#[tokio::test]
async fn test_wrong_codes_count_down_then_exhaust() {
    let (_, ctx) = store_and_context();
    let code = ctx.auth.generate_verification_code(JOHN).await.unwrap();
    let wrong = wrong_code(&code);

    for expected_remaining in [4u32, 3, 2, 1] {
        let attempt = ctx.auth.verify_code(JOHN, wrong).await;
        match attempt {
            Err(AppError::InvalidVerificationCode { attempts_remaining }) => {
                assert_eq!(attempts_remaining, expected_remaining);
                assert_eq!(
                    AppError::InvalidVerificationCode { attempts_remaining }.to_string(),
                    format!("Invalid code. {} attempts remaining.", expected_remaining)
                );
            }
            other => panic!("expected invalid-code error, got {:?}", other),
        }
    }

    // Fifth failure invalidates the code
    let exhausted = ctx.auth.verify_code(JOHN, wrong).await;
    match exhausted {
        Err(e) => assert_eq!(
            e.to_string(),
            "Too many failed attempts. Please request a new code."
        ),
        Ok(_) => panic!("fifth wrong attempt accepted"),
    }

    // Even the correct code is now gone
    let gone = ctx.auth.verify_code(JOHN, &code).await;
    assert!(matches!(gone, Err(AppError::NoVerificationCode)));
}

#[tokio::test]
async fn test_requesting_a_new_code_replaces_the_old_one() {
    let (_, ctx) = store_and_context();
    let first = ctx.auth.generate_verification_code(JOHN).await.unwrap();
    // Burn an attempt against the first code
    let _ = ctx.auth.verify_code(JOHN, wrong_code(&first)).await;

    let second = ctx.auth.generate_verification_code(JOHN).await.unwrap();
    // The fresh code carries a reset attempt counter
    let attempt = ctx.auth.verify_code(JOHN, wrong_code(&second)).await;
    assert!(matches!(
        attempt,
        Err(AppError::InvalidVerificationCode {
            attempts_remaining: 4
        })
    ));

    let user = ctx.auth.verify_code(JOHN, &second).await.unwrap();
    assert_eq!(user.email, JOHN);
}

#[tokio::test]
async fn test_code_requires_a_known_account() {
    let (_, ctx) = store_and_context();
    let denied = ctx
        .auth
        .generate_verification_code("nobody@beetguru.nz")
        .await;
    assert!(matches!(denied, Err(AppError::NotFound(_))));
}

// ============================================================================
// Property tests
// ============================================================================

/// Generate valid email addresses
fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z]{5,10}@[a-z]{3,8}\\.(com|org|nz|co\\.nz)"
}

/// Generate valid passwords (8+ chars)
fn password_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!@#$%]{8,20}"
}

proptest! {
    /// Property: generated emails satisfy the shared validator
    #[test]
    fn test_email_format(email in email_strategy()) {
        prop_assert!(shared::validation::validate_email(&email).is_ok());
    }

    /// Property: generated passwords satisfy the strength rule
    #[test]
    fn test_password_strength(password in password_strategy()) {
        prop_assert!(shared::validation::validate_password(&password).is_ok());
    }

    /// Property: unknown emails never sign in, whatever the password
    #[test]
    fn test_unknown_email_never_signs_in(
        email in "[a-z]{12,16}@nowhere\\.nz",
        password in password_strategy(),
    ) {
        tokio_test::block_on(async {
            let (_, ctx) = store_and_context();
            let denied = ctx.auth.login_with_password(&email, &password).await;
            assert!(matches!(denied, Err(AppError::InvalidCredentials)));
        });
    }
}
