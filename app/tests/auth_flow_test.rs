//! Account lifecycle integration tests.
//!
//! Runs the auth service against the static provider and the in-memory
//! store: sign-up writes the profile document with the derived username,
//! the profile flows read and update it, and sign-out clears the session.

mod common;

use std::sync::Arc;

use common::{MemoryBlobs, MemoryStore, StaticAuth};
use crafty_app::services::{AuthService, ImageAttachment};

struct Fixture {
    store: Arc<MemoryStore>,
    auth: Arc<AuthService>,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let blobs = Arc::new(MemoryBlobs::new());
    let auth = Arc::new(AuthService::new(
        Arc::new(StaticAuth::new()),
        store.clone(),
        blobs,
    ));
    Fixture { store, auth }
}

#[tokio::test]
async fn sign_up_writes_a_profile_with_the_derived_username() {
    let fixture = fixture();

    let user = fixture
        .auth
        .sign_up("ana.b@example.com", "secret1")
        .await
        .unwrap();

    let profile = fixture.store.document("users", &user.id).unwrap();
    assert_eq!(profile.fields["email"], "ana.b@example.com");
    assert_eq!(profile.fields["username"], "ana.b");
    // The store assigns createdAt, so it carries the store's clock, not
    // the caller's.
    assert_eq!(profile.fields["createdAt"], "2024-04-01T12:00:01+00:00");
}

#[tokio::test]
async fn failed_profile_write_does_not_fail_the_sign_up() {
    let fixture = fixture();
    fixture.store.fail_writes(true);

    let user = fixture
        .auth
        .sign_up("ana.b@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(user.email, "ana.b@example.com");
    assert_eq!(fixture.store.len("users"), 0);
}

#[tokio::test]
async fn profile_reads_back_after_sign_up() {
    let fixture = fixture();
    fixture.auth.sign_up("ana.b@example.com", "secret1").await.unwrap();

    let profile = fixture.auth.profile().await.unwrap().unwrap();
    assert_eq!(profile.username, "ana.b");
    assert_eq!(profile.email, "ana.b@example.com");
}

#[tokio::test]
async fn username_edit_updates_only_the_profile_document() {
    let fixture = fixture();
    let user = fixture
        .auth
        .sign_up("ana.b@example.com", "secret1")
        .await
        .unwrap();

    fixture.auth.update_username("  Ana  ").await.unwrap();

    let profile = fixture.store.document("users", &user.id).unwrap();
    assert_eq!(profile.fields["username"], "Ana");
    assert_eq!(profile.fields["email"], "ana.b@example.com");
}

#[tokio::test]
async fn profile_image_upload_records_the_url() {
    let fixture = fixture();
    let user = fixture
        .auth
        .sign_up("ana.b@example.com", "secret1")
        .await
        .unwrap();

    let image = ImageAttachment {
        bytes: vec![0xFF, 0xD8],
        content_type: "image/jpeg".into(),
    };
    let url = fixture.auth.set_profile_image(&image).await.unwrap();
    assert_eq!(url, format!("https://blobs.test/profileImages/{}", user.id));

    let profile = fixture.store.document("users", &user.id).unwrap();
    assert_eq!(profile.fields["profileImageUrl"], url);
}

#[tokio::test]
async fn sign_out_clears_the_session() {
    let fixture = fixture();
    fixture.auth.sign_up("ana.b@example.com", "secret1").await.unwrap();
    assert!(fixture.auth.current_user().is_some());

    fixture.auth.sign_out();
    assert!(fixture.auth.current_user().is_none());
    assert!(fixture.auth.profile().await.unwrap().is_none());
}
