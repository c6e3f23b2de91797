//! Integration tests for sign-in, sign-out and login challenges.
//!
//! These tests verify the end-to-end flow:
//! 1. Sign-in goes through the identity provider and reports the email
//! 2. Sign-out forgets the token even when the provider fails
//! 3. A login challenge opens the prompt once and settles the session
//! 4. The profile page waits for the prompt before loading
//!
//! Uses the mock adapters to test the flow without a real OAuth2 provider.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use conference_central::adapters::{MockIdentityProvider, MockLoginPrompt, MockRpcTransport};
use conference_central::application::{AppContext, LoginChallenge, UNAUTHORIZED_MESSAGE};
use conference_central::config::{AppConfig, AuthConfig};
use conference_central::domain::auth::{AuthError, AuthState};
use conference_central::domain::remote_call::ErrorKind;
use conference_central::domain::status::StatusLevel;
use conference_central::ports::{PromptOutcome, UserInfo};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn user(email: &str) -> UserInfo {
    UserInfo {
        email: Some(email.to_string()),
        name: Some("Ada".to_string()),
        verified_email: Some(true),
    }
}

struct Harness {
    ctx: AppContext,
    identity: Arc<MockIdentityProvider>,
    transport: Arc<MockRpcTransport>,
}

fn harness_with(
    config: AppConfig,
    identity: MockIdentityProvider,
    prompt: MockLoginPrompt,
) -> Harness {
    let identity = Arc::new(identity);
    let transport = Arc::new(MockRpcTransport::new());
    let ctx = AppContext::new(
        &config,
        transport.clone(),
        identity.clone(),
        Arc::new(prompt),
    );

    Harness {
        ctx,
        identity,
        transport,
    }
}

fn harness(prompt: MockLoginPrompt) -> Harness {
    harness_with(
        AppConfig::default(),
        MockIdentityProvider::new().with_user_info(user("a@b.com")),
        prompt,
    )
}

// =============================================================================
// Sign-in / sign-out
// =============================================================================

#[tokio::test(start_paused = true)]
async fn sign_in_establishes_identity() {
    let h = harness(MockLoginPrompt::dismissing());

    let identity = h.ctx.session().sign_in().await.unwrap();

    assert_eq!(identity.email, "a@b.com");
    assert_eq!(identity.display_name.as_deref(), Some("Ada"));
    assert_eq!(h.ctx.session().state(), AuthState::SignedIn);
    assert!(h.ctx.session().token().is_some());
    let status = h.ctx.status().current();
    assert_eq!(status.level, StatusLevel::Success);
    assert_eq!(status.message, "Logged in with a@b.com");
}

#[tokio::test(start_paused = true)]
async fn sign_in_without_email_fails() {
    let h = harness_with(
        AppConfig::default(),
        MockIdentityProvider::new().with_user_info(UserInfo::default()),
        MockLoginPrompt::dismissing(),
    );

    let result = h.ctx.session().sign_in().await;

    assert_eq!(result, Err(AuthError::MissingEmail));
    assert_eq!(h.ctx.session().state(), AuthState::SignedOut);
    assert_eq!(
        h.ctx.status().current().message,
        "Failed to login: Unable to retrieve user email"
    );
}

#[tokio::test(start_paused = true)]
async fn sign_out_forgets_token_and_status() {
    let h = harness(MockLoginPrompt::dismissing());
    h.ctx.session().sign_in().await.unwrap();

    h.ctx.sign_out().await;

    assert_eq!(h.ctx.session().state(), AuthState::SignedOut);
    assert!(h.ctx.session().token().is_none());
    assert!(h.ctx.session().identity().is_none());
    assert!(h.ctx.status().current().is_cleared());
    assert_eq!(h.identity.sign_out_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn provider_failure_does_not_block_sign_out() {
    let h = harness(MockLoginPrompt::dismissing());
    h.ctx.session().sign_in().await.unwrap();
    h.identity
        .set_error(AuthError::service_unavailable("revoke endpoint down"));

    h.ctx.sign_out().await;

    assert_eq!(h.ctx.session().state(), AuthState::SignedOut);
    assert!(h.ctx.session().token().is_none());
}

// =============================================================================
// Login challenge
// =============================================================================

#[tokio::test(start_paused = true)]
async fn challenge_is_not_reissued_while_pending() {
    let h = harness(MockLoginPrompt::abandoning());

    let first = h.ctx.session().challenge_login();
    let second = h.ctx.session().challenge_login();

    assert!(first.was_opened());
    assert!(matches!(second, LoginChallenge::AlreadyPending));
    assert_eq!(h.ctx.session().state(), AuthState::Authenticating);
}

#[tokio::test(start_paused = true)]
async fn dismissed_prompt_returns_to_signed_out() {
    let h = harness(MockLoginPrompt::dismissing());

    let outcome = h.ctx.session().challenge_login().outcome().await;

    assert_eq!(outcome, Some(PromptOutcome::Dismissed));
    assert_eq!(h.ctx.session().state(), AuthState::SignedOut);
    assert!(h.ctx.session().challenge_login().was_opened());
}

#[tokio::test(start_paused = true)]
async fn abandoned_prompt_times_out() {
    let config = AppConfig {
        auth: AuthConfig {
            login_timeout_secs: Some(30),
            ..AuthConfig::default()
        },
        ..AppConfig::default()
    };
    let h = harness_with(
        config,
        MockIdentityProvider::new().with_user_info(user("a@b.com")),
        MockLoginPrompt::abandoning(),
    );

    let challenge = h.ctx.session().challenge_login();
    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(h.ctx.session().state(), AuthState::Authenticating);

    let outcome = challenge.outcome().await;

    assert_eq!(outcome, Some(PromptOutcome::Dismissed));
    assert_eq!(h.ctx.session().state(), AuthState::SignedOut);
}

#[tokio::test(start_paused = true)]
async fn expired_credential_challenges_signed_in_user() {
    let h = harness(MockLoginPrompt::completing());
    h.ctx.session().sign_in().await.unwrap();
    h.transport
        .respond("getConferencesCreated", json!({"error": {"code": 401}}));

    let result = h.ctx.conferences().conferences_created().await;

    assert_eq!(result.kind(), Some(ErrorKind::Unauthorized));
    assert_eq!(h.ctx.session().state(), AuthState::Authenticating);
}

// =============================================================================
// Profile page
// =============================================================================

#[tokio::test(start_paused = true)]
async fn profile_loads_after_prompt_completes() {
    let h = harness(MockLoginPrompt::completing());
    h.transport.respond(
        "getProfile",
        json!({"result": {"displayName": "Ada", "mainEmail": "a@b.com"}}),
    );
    let profile = h.ctx.profile();

    let result = profile.load_after_sign_in().await;

    assert_eq!(
        result.data().and_then(|p| p.display_name.as_deref()),
        Some("Ada")
    );
    assert_eq!(profile.draft().display_name.as_deref(), Some("Ada"));
    assert!(h.ctx.session().is_signed_in());
}

#[tokio::test(start_paused = true)]
async fn profile_is_not_loaded_when_prompt_is_dismissed() {
    let h = harness(MockLoginPrompt::dismissing());

    let result = h.ctx.profile().load_after_sign_in().await;

    assert_eq!(result.kind(), Some(ErrorKind::Unauthorized));
    assert_eq!(result.message(), UNAUTHORIZED_MESSAGE);
    assert_eq!(h.transport.call_count("getProfile"), 0);
}

#[tokio::test(start_paused = true)]
async fn profile_waits_for_prompt_already_open() {
    let h = harness(MockLoginPrompt::completing());
    h.transport.respond(
        "getProfile",
        json!({"result": {"displayName": "Ada", "mainEmail": "a@b.com"}}),
    );
    let _challenge = h.ctx.session().challenge_login();

    let result = h.ctx.profile().load_after_sign_in().await;

    assert!(result.is_success());
    assert!(h.ctx.session().is_signed_in());
    assert_eq!(h.transport.call_count("getProfile"), 1);
}

#[tokio::test(start_paused = true)]
async fn profile_is_not_loaded_when_open_prompt_is_dismissed() {
    let h = harness(MockLoginPrompt::dismissing());
    let _challenge = h.ctx.session().challenge_login();

    let result = h.ctx.profile().load_after_sign_in().await;

    assert_eq!(result.kind(), Some(ErrorKind::Unauthorized));
    assert_eq!(h.ctx.session().state(), AuthState::SignedOut);
    assert_eq!(h.transport.call_count("getProfile"), 0);
}
