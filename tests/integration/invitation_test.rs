//! Invitation and access request endpoints.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_backyard_invitation_flow() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let b = app.create_user("b").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request(
            "POST",
            "/garden-invitations",
            Some(json!({ "gardenId": garden_id, "email": "b@example.com", "role": "member" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let invitation_id = response.id();

    let response = app.request("GET", "/garden-invitations", None, Some(&b.token)).await;
    let pending = response.body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["garden_name"], "Backyard");

    let response = app
        .request(
            "PATCH",
            &format!("/garden-invitations/{invitation_id}"),
            Some(json!({ "action": "accept" })),
            Some(&b.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["invitation"]["status"], "accepted");
    assert_eq!(response.body["data"]["membership_created"], true);

    let response = app
        .request(
            "GET",
            &format!("/garden-members?gardenId={garden_id}"),
            None,
            Some(&alice.token),
        )
        .await;
    let members: Vec<(String, String)> = response.body["data"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|m| {
            (
                m["username"].as_str().unwrap_or_default().to_string(),
                m["role"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        members,
        [
            ("alice".to_string(), "owner".to_string()),
            ("b".to_string(), "member".to_string()),
        ]
    );

    let response = app
        .request(
            "POST",
            &format!("/gardens/{garden_id}/locations"),
            Some(json!({ "name": "Greenhouse" })),
            Some(&b.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/gardens/{garden_id}"), None, Some(&b.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_location_scoped_invitation_is_rejected() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request(
            "POST",
            "/garden-invitations",
            Some(json!({
                "gardenLocationId": uuid::Uuid::new_v4(),
                "email": "b@example.com",
                "role": "member"
            })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");

    let response = app
        .request(
            "GET",
            &format!("/gardens/{garden_id}/invitations"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_invitation_role_errors() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    for (role, code) in [("gardener", "INVALID_ROLE"), ("owner", "VALIDATION")] {
        let response = app
            .request(
                "POST",
                "/garden-invitations",
                Some(json!({ "gardenId": garden_id, "email": "b@example.com", "role": role })),
                Some(&alice.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{role}");
        assert_eq!(response.error_code(), code, "{role}");
    }
}

#[tokio::test]
async fn test_accept_twice_then_decline() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request(
            "POST",
            "/garden-invitations",
            Some(json!({ "gardenId": garden_id, "email": "bob@example.com", "role": "viewer" })),
            Some(&alice.token),
        )
        .await;
    let path = format!("/garden-invitations/{}", response.id());

    let first = app
        .request("PATCH", &path, Some(json!({ "action": "accept" })), Some(&bob.token))
        .await;
    let second = app
        .request("PATCH", &path, Some(json!({ "action": "accept" })), Some(&bob.token))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        first.body["data"]["membership"]["id"],
        second.body["data"]["membership"]["id"]
    );
    assert_eq!(second.body["data"]["membership_created"], false);

    let response = app
        .request("PATCH", &path, Some(json!({ "action": "decline" })), Some(&bob.token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "INVALID_STATE");

    let response = app
        .request("PATCH", &path, Some(json!({ "action": "approve" })), Some(&bob.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invitation_for_someone_else_is_forbidden() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let mallory = app.create_user("mallory").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request(
            "POST",
            "/garden-invitations",
            Some(json!({ "gardenId": garden_id, "email": "bob@example.com", "role": "admin" })),
            Some(&alice.token),
        )
        .await;

    let response = app
        .request(
            "PATCH",
            &format!("/garden-invitations/{}", response.id()),
            Some(json!({ "action": "accept" })),
            Some(&mallory.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_access_request_approved_by_owner() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let dave = app.create_user("dave").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request(
            "POST",
            "/garden-access-request",
            Some(json!({ "gardenId": garden_id, "message": "Neighbour here" })),
            Some(&dave.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(
        response.body["data"]["message"],
        "dave requested access to Backyard: Neighbour here"
    );
    let request_id = response.id();

    let response = app
        .request(
            "POST",
            "/garden-access-request",
            Some(json!({ "gardenId": garden_id })),
            Some(&dave.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "GET",
            &format!("/gardens/{garden_id}/invitations"),
            None,
            Some(&alice.token),
        )
        .await;
    let listed = response.body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["is_access_request"], true);

    let response = app
        .request(
            "PATCH",
            &format!("/garden-invitations/{request_id}"),
            Some(json!({ "action": "accept" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["membership"]["user_id"],
        dave.id.to_string()
    );

    let response = app
        .request("GET", &format!("/gardens/{garden_id}"), None, Some(&dave.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "member");
}
