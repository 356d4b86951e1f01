//! Garden, location and plant endpoints.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_garden_makes_caller_owner() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request("GET", &format!("/gardens/{garden_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["name"], "Backyard");
    assert_eq!(data["role"], "owner");
    for flag in [
        "can_edit_garden",
        "can_add_plants",
        "can_edit_plants",
        "can_delete_plants",
        "can_invite_users",
        "can_manage_members",
    ] {
        assert_eq!(data["permissions"][flag], true, "{flag}");
    }

    let response = app.request("GET", "/gardens", None, Some(&alice.token)).await;
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_requests_without_token_are_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("GET", "/gardens", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");

    let response = app.request("GET", "/gardens", None, Some("not-a-jwt")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_garden_name_is_rejected() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;

    let response = app
        .request("POST", "/gardens", Some(json!({ "name": "" })), Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}

#[tokio::test]
async fn test_strangers_read_not_found_and_write_forbidden() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let mallory = app.create_user("mallory").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;
    let path = format!("/gardens/{garden_id}");

    let response = app.request("GET", &path, None, Some(&mallory.token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("PATCH", &path, Some(json!({ "name": "Mine" })), Some(&mallory.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(&mallory.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/gardens/{}", uuid::Uuid::new_v4()), None, Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_garden_needs_no_token() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request("GET", &format!("/public/gardens/{garden_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Backyard");
    assert!(response.body["data"].get("owner_user_id").is_none());
}

#[tokio::test]
async fn test_update_garden() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;

    let response = app
        .request(
            "PATCH",
            &format!("/gardens/{garden_id}"),
            Some(json!({ "description": "Behind the house" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Backyard");
    assert_eq!(response.body["data"]["description"], "Behind the house");
}

#[tokio::test]
async fn test_duplicate_location_name_conflicts() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;
    let path = format!("/gardens/{garden_id}/locations");
    let body = json!({ "name": "Herb Spiral", "soilType": "sandy loam" });

    let response = app.request("POST", &path, Some(body.clone()), Some(&alice.token)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["soil_type"], "sandy loam");

    let response = app.request("POST", &path, Some(body), Some(&alice.token)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "CONFLICT");

    let response = app.request("GET", &path, None, Some(&alice.token)).await;
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_delete_garden_cascades() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;
    app.add_member(&alice, &garden_id, &bob, "member").await;
    app.add_member(&alice, &garden_id, &carol, "viewer").await;

    let mut location_ids = Vec::new();
    for name in ["North Bed", "South Bed"] {
        let response = app
            .request(
                "POST",
                &format!("/gardens/{garden_id}/locations"),
                Some(json!({ "name": name })),
                Some(&alice.token),
            )
            .await;
        location_ids.push(response.id());
    }

    let members_path = format!("/garden-members?gardenId={garden_id}");
    let response = app.request("GET", &members_path, None, Some(&alice.token)).await;
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(3));

    let response = app
        .request("DELETE", &format!("/gardens/{garden_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    for id in &location_ids {
        let response = app
            .request("GET", &format!("/garden-locations/{id}"), None, Some(&alice.token))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
    let response = app.request("GET", "/gardens", None, Some(&bob.token)).await;
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_plant_lifecycle() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let garden_id = app.create_garden(&alice, "Backyard").await;
    app.add_member(&alice, &garden_id, &bob, "member").await;

    let response = app
        .request(
            "POST",
            &format!("/gardens/{garden_id}/locations"),
            Some(json!({ "name": "Bed" })),
            Some(&alice.token),
        )
        .await;
    let location_id = response.id();

    let response = app
        .request(
            "POST",
            &format!("/garden-locations/{location_id}/plants"),
            Some(json!({ "name": "Tomato", "variety": "Roma", "plantedAt": "2025-04-20" })),
            Some(&bob.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let plant_id = response.id();

    let response = app
        .request(
            "PATCH",
            &format!("/plants/{plant_id}"),
            Some(json!({ "notes": "Staked" })),
            Some(&bob.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["notes"], "Staked");

    let response = app
        .request("DELETE", &format!("/plants/{plant_id}"), None, Some(&bob.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/plants/{plant_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");

    let response = app.request("GET", "/health/ready", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "connected");
}
