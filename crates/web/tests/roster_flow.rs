//! End-to-end roster flow tests.
//!
//! Exercise the dashboard CRUD surface: add, edit, delete, search, and the
//! photo upload, all through the real router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;

use common::{TestClient, body_text, entry_ids, location, sign_up_and_log_in};

async fn add_entry(client: &mut TestClient, name: &str, email: &str, phone: &str) {
    let response = client
        .post_multipart(
            "/home/entries",
            &[("name", name), ("email", email), ("phone", phone)],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/home");
}

#[tokio::test]
async fn dashboard_starts_empty() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    let response = client.get("/home").await;
    let body = body_text(response).await;
    assert!(body.contains("No users found"));
}

#[tokio::test]
async fn add_appends_entries_in_order() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    add_entry(&mut client, "John", "john@example.com", "5551111111").await;
    add_entry(&mut client, "Jane", "jane@example.com", "5552222222").await;

    let body = body_text(client.get("/home").await).await;
    assert!(!body.contains("No users found"));
    assert_eq!(entry_ids(&body).len(), 2);

    let john = body.find("John").unwrap();
    let jane = body.find("Jane").unwrap();
    assert!(john < jane, "entries render in insertion order");
}

#[tokio::test]
async fn edit_form_is_prefilled_and_update_replaces_in_place() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    add_entry(&mut client, "John", "john@example.com", "5551111111").await;
    add_entry(&mut client, "Jane", "jane@example.com", "5552222222").await;
    add_entry(&mut client, "Joe", "joe@example.com", "5553333333").await;

    let body = body_text(client.get("/home").await).await;
    let ids = entry_ids(&body);
    let middle = ids[1].clone();

    // The edit form opens pre-filled with the entry's values.
    let response = client.get(&format!("/home/entries/{middle}/edit")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Edit User Details"));
    assert!(body.contains("value=\"Jane\""));
    assert!(body.contains("value=\"jane@example.com\""));

    let response = client
        .post_multipart(
            &format!("/home/entries/{middle}"),
            &[
                ("name", "Janet"),
                ("email", "janet@example.com"),
                ("phone", "5554444444"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/home");

    let body = body_text(client.get("/home").await).await;
    let after = entry_ids(&body);
    assert_eq!(after.len(), 3);
    assert_eq!(after, ids, "edit leaves every position unchanged");
    assert!(body.contains("Janet"));
    assert!(!body.contains("value=\"Jane\""));

    let john = body.find("John").unwrap();
    let janet = body.find("Janet").unwrap();
    let joe = body.find("Joe").unwrap();
    assert!(john < janet && janet < joe);
}

#[tokio::test]
async fn editing_with_identical_values_changes_nothing() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    add_entry(&mut client, "John", "john@example.com", "5551111111").await;
    let before = body_text(client.get("/home").await).await;
    let ids = entry_ids(&before);

    client
        .post_multipart(
            &format!("/home/entries/{}", ids[0]),
            &[
                ("name", "John"),
                ("email", "john@example.com"),
                ("phone", "5551111111"),
            ],
        )
        .await;

    let after = body_text(client.get("/home").await).await;
    // Compare from the roster grid down; the welcome card's celebration
    // banner is time-dependent.
    let grid = |body: &str| body[body.find("card-grid").unwrap()..].to_string();
    assert_eq!(grid(&before), grid(&after));
}

#[tokio::test]
async fn delete_shifts_later_entries_down() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    add_entry(&mut client, "John", "john@example.com", "5551111111").await;
    add_entry(&mut client, "Jane", "jane@example.com", "5552222222").await;
    add_entry(&mut client, "Joe", "joe@example.com", "5553333333").await;

    let body = body_text(client.get("/home").await).await;
    let ids = entry_ids(&body);

    let response = client
        .post_form(&format!("/home/entries/{}/delete", ids[1]), "")
        .await;
    assert_eq!(location(&response), "/home");

    let body = body_text(client.get("/home").await).await;
    let after = entry_ids(&body);
    assert_eq!(after, vec![ids[0].clone(), ids[2].clone()]);
    assert!(!body.contains("Jane"));

    // Deleting the same entry again is a no-op.
    let response = client
        .post_form(&format!("/home/entries/{}/delete", ids[1]), "")
        .await;
    assert_eq!(location(&response), "/home");
    let body = body_text(client.get("/home").await).await;
    assert_eq!(entry_ids(&body).len(), 2);
}

#[tokio::test]
async fn search_filters_without_mutating() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    add_entry(&mut client, "John", "john@example.com", "5551111111").await;
    add_entry(&mut client, "Mary", "mary@example.com", "5552222222").await;
    add_entry(&mut client, "Joe", "joe@example.com", "5553333333").await;

    let body = body_text(client.get("/home?q=jo").await).await;
    assert!(body.contains("John"));
    assert!(body.contains("Joe"));
    assert!(!body.contains("Mary"));

    // Case-insensitive.
    let body = body_text(client.get("/home?q=JO").await).await;
    assert!(body.contains("John"));

    // No matches renders the empty state.
    let body = body_text(client.get("/home?q=zzz").await).await;
    assert!(body.contains("No users found"));

    // Clearing the term restores the full list.
    let body = body_text(client.get("/home").await).await;
    assert_eq!(entry_ids(&body).len(), 3);
}

#[tokio::test]
async fn photo_upload_embeds_a_data_url() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    let response = client
        .post_multipart_with_file(
            "/home/entries",
            &[
                ("name", "John"),
                ("email", "john@example.com"),
                ("phone", "5551111111"),
            ],
            "photo",
            "avatar.png",
            "image/png",
            &[0x89, b'P', b'N', b'G'],
        )
        .await;
    assert_eq!(location(&response), "/home");

    let body = body_text(client.get("/home").await).await;
    assert!(body.contains("data:image/png;base64,iVBORw=="));
}

#[tokio::test]
async fn editing_without_a_new_photo_keeps_the_existing_one() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    client
        .post_multipart_with_file(
            "/home/entries",
            &[
                ("name", "John"),
                ("email", "john@example.com"),
                ("phone", "5551111111"),
            ],
            "photo",
            "avatar.png",
            "image/png",
            &[0x89, b'P', b'N', b'G'],
        )
        .await;

    let body = body_text(client.get("/home").await).await;
    let ids = entry_ids(&body);

    client
        .post_multipart(
            &format!("/home/entries/{}", ids[0]),
            &[
                ("name", "Johnny"),
                ("email", "john@example.com"),
                ("phone", "5551111111"),
            ],
        )
        .await;

    let body = body_text(client.get("/home").await).await;
    assert!(body.contains("Johnny"));
    assert!(body.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn invalid_entry_submissions_do_not_mutate_the_roster() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    // Over-long phone.
    let response = client
        .post_multipart(
            "/home/entries",
            &[
                ("name", "John"),
                ("email", "john@example.com"),
                ("phone", "55511111111"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("phone number must be at most 10 characters"));
    // Entered values are retained in the reopened form.
    assert!(body.contains("value=\"John\""));

    // Malformed email.
    let response = client
        .post_multipart(
            "/home/entries",
            &[
                ("name", "John"),
                ("email", "not-an-email"),
                ("phone", "5551111111"),
            ],
        )
        .await;
    let body = body_text(response).await;
    assert!(body.contains("email must contain an @ symbol"));

    let body = body_text(client.get("/home").await).await;
    assert!(body.contains("No users found"));
}

#[tokio::test]
async fn editing_an_unknown_entry_is_not_found() {
    let mut client = TestClient::new();
    sign_up_and_log_in(&mut client).await;

    let response = client
        .get("/home/entries/00000000-0000-4000-8000-000000000000/edit")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roster_routes_are_guarded() {
    let mut client = TestClient::new();

    let response = client
        .post_multipart(
            "/home/entries",
            &[
                ("name", "John"),
                ("email", "john@example.com"),
                ("phone", "5551111111"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
