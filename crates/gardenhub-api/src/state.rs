//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use gardenhub_auth::jwt::JwtDecoder;
use gardenhub_core::config::AppConfig;
use gardenhub_database::Store;
use gardenhub_service::{
    AccessRequestService, GardenService, InvitationService, LocationService, MembershipService,
    PlantService,
};

/// Shared application state passed to all Axum handlers via `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub jwt_decoder: Arc<JwtDecoder>,

    pub garden_service: Arc<GardenService>,
    pub location_service: Arc<LocationService>,
    pub plant_service: Arc<PlantService>,
    pub membership_service: Arc<MembershipService>,
    pub invitation_service: Arc<InvitationService>,
    pub access_request_service: Arc<AccessRequestService>,
}

impl AppState {
    /// Wires every service onto one store.
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let garden_service = Arc::new(GardenService::new(Arc::clone(&store)));
        let location_service = Arc::new(LocationService::new(Arc::clone(&store)));
        let plant_service = Arc::new(PlantService::new(Arc::clone(&store)));
        let membership_service = Arc::new(MembershipService::new(Arc::clone(&store)));
        let invitation_service = Arc::new(InvitationService::new(
            Arc::clone(&store),
            &config.invitations,
        ));
        let access_request_service = Arc::new(AccessRequestService::new(
            Arc::clone(&store),
            &config.invitations,
        ));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder,
            garden_service,
            location_service,
            plant_service,
            membership_service,
            invitation_service,
            access_request_service,
        }
    }
}
