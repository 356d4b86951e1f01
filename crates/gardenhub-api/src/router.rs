//! Route definitions for the GardenHub HTTP API.
//!
//! Routes are grouped by domain. The router receives `AppState` and passes
//! it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route and the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(garden_routes())
        .merge(location_routes())
        .merge(plant_routes())
        .merge(member_routes())
        .merge(invitation_routes())
        .merge(public_routes())
        .merge(health_routes())
        .with_state(state)
}

/// Garden CRUD plus the garden-scoped collections
fn garden_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/gardens",
            post(handlers::garden::create_garden).get(handlers::garden::list_gardens),
        )
        .route(
            "/gardens/{id}",
            get(handlers::garden::get_garden)
                .patch(handlers::garden::update_garden)
                .delete(handlers::garden::delete_garden),
        )
        .route(
            "/gardens/{id}/locations",
            post(handlers::location::create_location).get(handlers::location::list_locations),
        )
        .route(
            "/gardens/{id}/invitations",
            get(handlers::invitation::list_garden_invitations),
        )
}

fn location_routes() -> Router<AppState> {
    Router::new().route(
        "/garden-locations/{id}",
        get(handlers::location::get_location)
            .patch(handlers::location::update_location)
            .delete(handlers::location::delete_location),
    )
}

fn plant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/garden-locations/{id}/plants",
            post(handlers::plant::create_plant).get(handlers::plant::list_plants),
        )
        .route(
            "/plants/{id}",
            get(handlers::plant::get_plant)
                .patch(handlers::plant::update_plant)
                .delete(handlers::plant::delete_plant),
        )
}

/// Membership listing and management
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/garden-members", get(handlers::member::list_members))
        .route(
            "/garden-members/{id}",
            patch(handlers::member::change_role).delete(handlers::member::remove_member),
        )
}

/// Invitations and access requests
fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/garden-invitations",
            post(handlers::invitation::create_invitation)
                .get(handlers::invitation::list_my_invitations),
        )
        .route(
            "/garden-invitations/{id}",
            patch(handlers::invitation::respond_to_invitation),
        )
        .route(
            "/garden-access-request",
            post(handlers::access_request::request_access),
        )
}

/// Unauthenticated garden summaries
fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/public/gardens/{id}",
        get(handlers::public::get_public_garden),
    )
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::readiness))
}
