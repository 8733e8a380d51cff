//! Session lifecycle: creation, sliding renewal, expiry and the gate's
//! single rejection.
//!
//! Runs against the in-memory stores with controllable clocks, so every
//! timestamp is exact.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, Duration, Utc};
use portico_auth::constants::{EXPIRATION_WINDOW, TOKEN_LENGTH};
use portico_auth::mocks::{MockSessionStore, MockUserRepository};
use portico_auth::providers::{SessionStore, UserRepository};
use portico_auth::token::generate_token;
use portico_auth::{AuthError, AuthGate, Session, SessionId, User, UserId};
use portico_core::environment::Clock;
use portico_testing::mocks::{ManualClock, SteppingClock, test_clock};
use proptest::prelude::*;

fn start() -> DateTime<Utc> {
    test_clock().now()
}

async fn seed_user(users: &MockUserRepository) -> User {
    let now = start();
    users
        .insert(&User {
            id: UserId::new(),
            username: "maria".into(),
            email: "maria@example.com".into(),
            password: "digest".into(),
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap()
}

struct Fixture<C> {
    users: MockUserRepository,
    sessions: MockSessionStore<C>,
    gate: AuthGate<MockSessionStore<C>, MockUserRepository>,
    user: User,
}

async fn fixture<C: Clock + Clone>(clock: C) -> Fixture<C> {
    let users = MockUserRepository::new();
    let user = seed_user(&users).await;
    let sessions = MockSessionStore::new(clock).with_users(users.clone());
    let gate = AuthGate::new(sessions.clone(), users.clone());
    Fixture {
        users,
        sessions,
        gate,
        user,
    }
}

#[tokio::test]
async fn created_session_expires_one_window_after_creation() {
    let f = fixture(ManualClock::new(start())).await;

    let session = f.sessions.create(f.user.id).await.unwrap();

    assert_eq!(session.created_at, start());
    assert_eq!(session.updated_at, start());
    assert_eq!(session.expires_at, start() + EXPIRATION_WINDOW);
    assert_eq!(session.token.len(), TOKEN_LENGTH);
    assert_eq!(session.user_id, f.user.id);
}

#[tokio::test]
async fn lookup_strictly_advances_both_timestamps() {
    let clock = SteppingClock::new(start(), Duration::milliseconds(1));
    let f = fixture(clock).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    let renewed = f.sessions.find_one_valid_by_token(&created.token).await.unwrap();

    assert!(renewed.updated_at > created.updated_at);
    assert!(renewed.expires_at > created.expires_at);
    assert_eq!(renewed.expires_at, renewed.updated_at + EXPIRATION_WINDOW);
    assert_eq!(renewed.created_at, created.created_at);
    assert_eq!(renewed.id, created.id);
}

#[tokio::test]
async fn repeated_lookups_are_monotonic() {
    let clock = SteppingClock::new(start(), Duration::seconds(1));
    let f = fixture(clock).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    let mut previous = created.expires_at;
    for _ in 0..10 {
        let renewed = f.sessions.find_one_valid_by_token(&created.token).await.unwrap();
        assert!(renewed.expires_at > previous);
        previous = renewed.expires_at;
    }
}

#[tokio::test]
async fn half_window_lookup_extends_from_lookup_time() {
    let clock = ManualClock::new(start());
    let f = fixture(clock.clone()).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    clock.advance(EXPIRATION_WINDOW / 2);
    let renewed = f.sessions.find_one_valid_by_token(&created.token).await.unwrap();

    assert_eq!(renewed.updated_at, start() + EXPIRATION_WINDOW / 2);
    assert_eq!(renewed.expires_at, start() + EXPIRATION_WINDOW / 2 + EXPIRATION_WINDOW);
}

#[tokio::test]
async fn session_is_not_found_at_and_after_expiry() {
    let clock = ManualClock::new(start());
    let f = fixture(clock.clone()).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    // Exactly at expires_at the session is no longer active.
    clock.set(created.expires_at);
    assert_eq!(
        f.sessions.find_one_valid_by_token(&created.token).await,
        Err(AuthError::SessionNotFound)
    );

    clock.advance(Duration::days(1));
    assert_eq!(
        f.sessions.find_one_valid_by_token(&created.token).await,
        Err(AuthError::SessionNotFound)
    );

    // Expired sessions are ignored, not deleted, and not renewed.
    let stored = f.sessions.peek(&created.token).unwrap().unwrap();
    assert_eq!(stored.expires_at, created.expires_at);
}

#[tokio::test]
async fn lookup_right_after_creation_then_expiry_scenario() {
    let clock = ManualClock::new(start());
    let f = fixture(clock.clone()).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    clock.advance(Duration::milliseconds(5));
    let authenticated = f.gate.authenticate(Some(&created.token)).await.unwrap();
    assert!(authenticated.session.updated_at > created.updated_at);
    assert_eq!(authenticated.user, f.user);

    // A session created a full window (and then some) in the past.
    let stale_created = clock.now() - EXPIRATION_WINDOW - Duration::seconds(1);
    let stale = Session {
        id: SessionId::new(),
        token: generate_token(),
        user_id: f.user.id,
        expires_at: stale_created + EXPIRATION_WINDOW,
        created_at: stale_created,
        updated_at: stale_created,
    };
    f.sessions.insert_session(stale.clone()).unwrap();

    assert_eq!(
        f.gate.authenticate(Some(&stale.token)).await,
        Err(AuthError::NoActiveSession)
    );
}

#[tokio::test]
async fn expired_and_unknown_tokens_are_indistinguishable() {
    let clock = ManualClock::new(start());
    let f = fixture(clock.clone()).await;
    let created = f.sessions.create(f.user.id).await.unwrap();
    clock.advance(EXPIRATION_WINDOW + Duration::seconds(1));

    let expired = f.gate.authenticate(Some(&created.token)).await;
    let unknown = f.gate.authenticate(Some(&generate_token())).await;
    let missing = f.gate.authenticate(None).await;

    assert_eq!(expired, Err(AuthError::NoActiveSession));
    assert_eq!(expired, unknown);
    assert_eq!(expired, missing);
}

#[tokio::test]
async fn session_of_deleted_user_is_rejected() {
    let f = fixture(ManualClock::new(start())).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    f.users.remove(f.user.id).unwrap();

    assert_eq!(
        f.gate.authenticate(Some(&created.token)).await,
        Err(AuthError::NoActiveSession)
    );
}

#[tokio::test]
async fn creating_session_for_unknown_user_fails() {
    let f = fixture(ManualClock::new(start())).await;

    let result = f.sessions.create(UserId::new()).await;

    assert!(matches!(result, Err(AuthError::DatabaseError(_))));
    assert_eq!(f.sessions.session_count().unwrap(), 0);
}

#[tokio::test]
async fn tokens_are_unique_per_session() {
    let f = fixture(ManualClock::new(start())).await;

    let first = f.sessions.create(f.user.id).await.unwrap();
    let second = f.sessions.create(f.user.id).await.unwrap();

    assert_ne!(first.token, second.token);
    assert_ne!(first.id, second.id);
    assert_eq!(f.sessions.session_count().unwrap(), 2);
}

#[tokio::test]
async fn concurrent_renewals_both_succeed_and_keep_the_latest() {
    let clock = SteppingClock::new(start(), Duration::milliseconds(10));
    let f = fixture(clock).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    let (a, b) = tokio::join!(
        f.sessions.find_one_valid_by_token(&created.token),
        f.sessions.find_one_valid_by_token(&created.token),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    let later = a.updated_at.max(b.updated_at);
    let stored = f.sessions.peek(&created.token).unwrap().unwrap();
    assert_eq!(stored.expires_at, later + EXPIRATION_WINDOW);
}

#[tokio::test]
async fn renewal_committed_late_does_not_move_expiry_backward() {
    let clock = SteppingClock::new(start(), Duration::seconds(10));
    let f = fixture(clock).await;
    let created = f.sessions.create(f.user.id).await.unwrap();

    // Both lookups sample the clock when called: early at +10s, late at +20s.
    let early = f.sessions.find_one_valid_by_token(&created.token);
    let late = f.sessions.find_one_valid_by_token(&created.token);

    let late = late.await.unwrap();
    let early = early.await.unwrap();

    let latest = start() + Duration::seconds(20);
    assert_eq!(late.updated_at, latest);
    assert_eq!(early.updated_at, latest);

    let stored = f.sessions.peek(&created.token).unwrap().unwrap();
    assert_eq!(stored.updated_at, latest);
    assert_eq!(stored.expires_at, latest + EXPIRATION_WINDOW);
}

proptest! {
    #[test]
    fn garbage_tokens_are_rejected(token in "[0-9a-zA-Z]{0,120}") {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let result = runtime.block_on(async {
            let f = fixture(ManualClock::new(start())).await;
            f.sessions.create(f.user.id).await.unwrap();
            f.gate.authenticate(Some(&token)).await
        });

        prop_assert_eq!(result, Err(AuthError::NoActiveSession));
    }

    #[test]
    fn same_length_hex_tokens_are_rejected(token in "[0-9a-f]{96}") {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let result = runtime.block_on(async {
            let f = fixture(ManualClock::new(start())).await;
            f.gate.authenticate(Some(&token)).await
        });

        prop_assert_eq!(result, Err(AuthError::NoActiveSession));
    }
}
