mod common;

use axum::http::StatusCode;
use boutique::db::UserStore;
use chrono::{TimeZone, Utc};

use common::{
    body_text, flashes, location, multipart_body, spawn_app, test_time, PNG_HEADER,
};

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = spawn_app();
    let resp = app.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
}

// ── Registration ────────────────────────────────────────────────

#[tokio::test]
async fn register_persists_hashed_password_and_redirects_to_login() {
    let app = spawn_app();

    let resp = app
        .post_form(
            "/register",
            "email=claire%40test.com&password=password123",
            None,
        )
        .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
    let notes = flashes(&resp);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, "success");

    let user = app
        .users
        .find_by_email("claire@test.com")
        .await
        .unwrap()
        .expect("user was not persisted");
    assert!(!user.password_hash.is_empty());
    assert_ne!(user.password_hash, "password123");
    assert_eq!(user.created_at, user.updated_at);
    assert!(!user.roles.is_empty());
}

#[tokio::test]
async fn register_with_field_errors_re_renders_the_form() {
    let app = spawn_app();

    let resp = app
        .post_form("/register", "email=claire%40test.com&password=short", None)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_text(resp).await;
    assert!(page.contains("Password must be at least 8 characters"));
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn register_while_authenticated_is_rejected_with_a_warning() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let resp = app
        .post_form(
            "/register",
            "email=other%40test.com&password=password123",
            Some(&cookie),
        )
        .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let notes = flashes(&resp);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, "warning");

    // No second account was created.
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = spawn_app();
    app.post_form("/register", "email=a%40test.com&password=password123", None)
        .await;

    let resp = app
        .post_form("/register", "email=a%40test.com&password=password123", None)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_text(resp).await;
    assert!(page.contains("already exists"));
    assert_eq!(app.users.len(), 1);
}

// ── Login ───────────────────────────────────────────────────────

#[tokio::test]
async fn login_with_valid_credentials_sets_a_session() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;
    assert!(cookie.starts_with("access_token="));

    // The session opens the dashboard.
    let resp = app.get("/dashboard", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_re_renders_with_an_error() {
    let app = spawn_app();
    app.post_form(
        "/register",
        "email=admin%40test.com&password=password123",
        None,
    )
    .await;

    let resp = app
        .post_form(
            "/auth/login",
            "email=admin%40test.com&password=wrongpassword",
            None,
        )
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Invalid credentials"));
}

#[tokio::test]
async fn dashboard_redirects_anonymous_visitors_to_login() {
    let app = spawn_app();
    let resp = app.get("/dashboard", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
}

// ── Product create ──────────────────────────────────────────────

#[tokio::test]
async fn create_product_without_photo() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(
        &[("name", "Chair"), ("description", "A chair"), ("price", "20")],
        None,
    );
    let resp = app
        .post_multipart("/admin/products/new", body, Some(&cookie))
        .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");
    let notes = flashes(&resp);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, "success");

    let saved = &app.products.all()[0];
    assert_eq!(saved.name, "Chair");
    assert_eq!(saved.price.to_string(), "20");
    assert_eq!(saved.photo, None);
    assert_eq!(saved.created_at, saved.updated_at);
    assert_eq!(saved.created_at, test_time());
    assert_eq!(saved.deleted_at, None);
}

#[tokio::test]
async fn create_product_with_photo_stores_a_renamed_file() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(
        &[("name", "Chair"), ("description", ""), ("price", "20")],
        // Client lies about the extension; the content is PNG.
        Some(("Chair Photo.jpg", "image/jpeg", PNG_HEADER)),
    );
    let resp = app
        .post_multipart("/admin/products/new", body, Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let saved = &app.products.all()[0];
    let photo = saved.photo.clone().expect("photo was not recorded");
    assert_ne!(photo, "Chair Photo.jpg");
    assert!(photo.starts_with("chair-photo_"), "got {photo}");
    assert!(photo.ends_with(".png"), "got {photo}");
    assert!(app.uploads.path().join(&photo).exists());
}

#[tokio::test]
async fn same_client_filename_twice_stores_two_distinct_files() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    for _ in 0..2 {
        let body = multipart_body(
            &[("name", "Chair"), ("description", ""), ("price", "20")],
            Some(("photo.png", "image/png", PNG_HEADER)),
        );
        let resp = app
            .post_multipart("/admin/products/new", body, Some(&cookie))
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    let products = app.products.all();
    assert_eq!(products.len(), 2);
    let a = products[0].photo.clone().unwrap();
    let b = products[1].photo.clone().unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn failed_photo_upload_warns_but_still_saves_the_product() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(
        &[("name", "Chair"), ("description", ""), ("price", "20")],
        Some(("photo.png", "image/png", b"definitely not an image")),
    );
    let resp = app
        .post_multipart("/admin/products/new", body, Some(&cookie))
        .await;

    // The save is not blocked by the upload failure.
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let notes = flashes(&resp);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].0, "success");
    assert_eq!(notes[1].0, "warning");

    let saved = &app.products.all()[0];
    assert_eq!(saved.name, "Chair");
    assert_eq!(saved.photo, None);
}

#[tokio::test]
async fn create_with_invalid_fields_re_renders_the_form() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(&[("name", ""), ("price", "twenty")], None);
    let resp = app
        .post_multipart("/admin/products/new", body, Some(&cookie))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_text(resp).await;
    assert!(page.contains("Name is required"));
    assert!(page.contains("Price must be a number"));
    assert!(app.products.is_empty());
}

#[tokio::test]
async fn product_routes_require_the_admin_role() {
    let app = spawn_app();
    app.bootstrap_admin().await;

    // Second account only carries the base role.
    app.post_form(
        "/register",
        "email=visitor%40test.com&password=password123",
        None,
    )
    .await;
    let cookie = app.login("visitor%40test.com", "password123").await;

    let body = multipart_body(&[("name", "Chair"), ("price", "20")], None);
    let resp = app
        .post_multipart("/admin/products/new", body, Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(app.products.is_empty());
}

// ── Product update ──────────────────────────────────────────────

#[tokio::test]
async fn update_without_new_photo_preserves_the_stored_one() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(
        &[("name", "Chair"), ("description", ""), ("price", "20")],
        Some(("photo.png", "image/png", PNG_HEADER)),
    );
    app.post_multipart("/admin/products/new", body, Some(&cookie))
        .await;
    let created = app.products.all().remove(0);
    let original_photo = created.photo.clone();

    app.clock
        .set(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap());

    let body = multipart_body(
        &[("name", "Armchair"), ("description", ""), ("price", "35")],
        None,
    );
    let resp = app
        .post_multipart(
            &format!("/admin/products/{}/edit", created.id),
            body,
            Some(&cookie),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let updated = app.products.get(created.id).unwrap();
    assert_eq!(updated.name, "Armchair");
    assert_eq!(updated.photo, original_photo);
    assert!(updated.updated_at > updated.created_at);
}

#[tokio::test]
async fn update_unknown_product_is_not_found() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(&[("name", "Chair"), ("price", "20")], None);
    let resp = app
        .post_multipart(
            "/admin/products/00000000-0000-7000-8000-000000000000/edit",
            body,
            Some(&cookie),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Archive ─────────────────────────────────────────────────────

#[tokio::test]
async fn archive_soft_deletes_and_hides_from_the_dashboard() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(&[("name", "Chair"), ("price", "20")], None);
    app.post_multipart("/admin/products/new", body, Some(&cookie))
        .await;
    let created = app.products.all().remove(0);

    let resp = app
        .get(
            &format!("/admin/products/{}/archive", created.id),
            Some(&cookie),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");

    let archived = app.products.get(created.id).unwrap();
    assert!(archived.is_archived());

    // Still stored, no longer listed.
    let page = body_text(app.get("/dashboard", Some(&cookie)).await).await;
    assert!(!page.contains("Chair"));
    assert_eq!(app.products.len(), 1);
}

#[tokio::test]
async fn archiving_twice_restamps_but_stays_archived() {
    let app = spawn_app();
    let cookie = app.bootstrap_admin().await;

    let body = multipart_body(&[("name", "Chair"), ("price", "20")], None);
    app.post_multipart("/admin/products/new", body, Some(&cookie))
        .await;
    let id = app.products.all().remove(0).id;

    app.get(&format!("/admin/products/{id}/archive"), Some(&cookie))
        .await;
    let first = app.products.get(id).unwrap().deleted_at.unwrap();

    app.clock
        .set(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    app.get(&format!("/admin/products/{id}/archive"), Some(&cookie))
        .await;

    let second = app.products.get(id).unwrap().deleted_at.unwrap();
    assert!(second > first);
}
