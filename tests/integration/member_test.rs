//! Membership management endpoints.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_demoted_member_loses_plant_rights() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;
    let membership_id = app.add_member(&alice, &garden_id, &bob, "member").await;

    let response = app
        .request(
            "POST",
            &format!("/gardens/{garden_id}/locations"),
            Some(json!({ "name": "Bed" })),
            Some(&alice.token),
        )
        .await;
    let plants_path = format!("/garden-locations/{}/plants", response.id());

    let response = app
        .request(
            "PATCH",
            &format!("/garden-members/{membership_id}"),
            Some(json!({ "role": "viewer" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["membership"]["role"], "viewer");
    assert_eq!(response.body["data"]["permissions"]["can_add_plants"], false);

    let response = app
        .request("POST", &plants_path, Some(json!({ "name": "Kale" })), Some(&bob.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &format!("/garden-members/{membership_id}"),
            Some(json!({ "role": "admin" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.body["data"]["permissions"]["can_manage_members"], true);
}

#[tokio::test]
async fn test_owner_membership_cannot_be_changed() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request(
            "GET",
            &format!("/garden-members?gardenId={garden_id}"),
            None,
            Some(&alice.token),
        )
        .await;
    let owner_membership = response.body["data"][0]["id"]
        .as_str()
        .expect("owner membership id")
        .to_string();
    let path = format!("/garden-members/{owner_membership}");

    let response = app.request("DELETE", &path, None, Some(&alice.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PATCH", &path, Some(json!({ "role": "viewer" })), Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/gardens/{garden_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(response.body["data"]["role"], "owner");
}

#[tokio::test]
async fn test_role_change_input_errors() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;
    let membership_id = app.add_member(&alice, &garden_id, &bob, "member").await;
    let path = format!("/garden-members/{membership_id}");

    for (role, code) in [("owner", "VALIDATION"), ("superuser", "INVALID_ROLE")] {
        let response = app
            .request("PATCH", &path, Some(json!({ "role": role })), Some(&alice.token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{role}");
        assert_eq!(response.error_code(), code, "{role}");
    }
}

#[tokio::test]
async fn test_removed_member_loses_access() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;
    let membership_id = app.add_member(&alice, &garden_id, &bob, "member").await;

    let response = app
        .request(
            "DELETE",
            &format!("/garden-members/{membership_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/garden-members/{membership_id}"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/gardens/{garden_id}"), None, Some(&bob.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "GET",
            &format!("/garden-members?gardenId={garden_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
