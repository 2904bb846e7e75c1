//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AdmissionService, IdentityService, ListingService, ReconciliationService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    auth, bookings, health, listings, maintenance, metrics, request_id, users,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        // Users
        users::list_users,
        users::get_user,
        users::set_user_role,
        // Listings
        listings::create_listing,
        listings::list_listings,
        listings::get_listing,
        listings::my_listings,
        // Bookings
        bookings::create_booking,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::modify_booking,
        bookings::cancel_booking,
        // Maintenance
        maintenance::reconcile_bookings,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<listings::ListingDto>,
            PaginatedResponse<auth::UserInfo>,
            PaginationQuery,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            // Users
            users::SetRoleRequest,
            // Listings
            listings::CreateListingRequest,
            listings::ListingDto,
            // Bookings
            bookings::CreateBookingRequest,
            bookings::ModifyBookingRequest,
            bookings::BookingDto,
            // Maintenance
            maintenance::GroupOutcomeDto,
            maintenance::ReconciliationReportDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Account registration and JWT login"),
        (name = "Users", description = "Account administration (admin only)"),
        (name = "Listings", description = "Property catalog: publish and browse rentals"),
        (name = "Bookings", description = "Stay reservations: propose, modify, cancel"),
        (name = "Maintenance", description = "Data-repair operations such as duplicate-booking reconciliation"),
    ),
    info(
        title = "StayHub Booking API",
        version = "1.0.0",
        description = "REST API for property rentals: listings, bookings and conflict-free admission",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Everything the router needs, bundled to keep the signature short.
pub struct RouterDeps {
    pub repos: Arc<dyn RepositoryProvider>,
    pub db: DatabaseConnection,
    pub jwt_config: JwtConfig,
    pub identity: Arc<IdentityService>,
    pub listings: Arc<ListingService>,
    pub admission: Arc<AdmissionService>,
    pub reconciliation: Arc<ReconciliationService>,
    pub metrics_handle: PrometheusHandle,
}

/// Create the API router with all routes
pub fn create_api_router(deps: RouterDeps) -> Router {
    let middleware_state = AuthState {
        jwt_config: deps.jwt_config.clone(),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_state = auth::AuthHandlerState {
        identity: Arc::clone(&deps.identity),
    };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // User administration routes (admin only)
    let user_state = users::UserHandlerState {
        identity: Arc::clone(&deps.identity),
    };
    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/{id}", get(users::get_user))
        .route("/{id}/role", axum::routing::put(users::set_user_role))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Listing routes (protected)
    let listing_state = listings::ListingHandlerState {
        listings: Arc::clone(&deps.listings),
    };
    let listing_routes = Router::new()
        .route(
            "/",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/mine", get(listings::my_listings))
        .route("/{id}", get(listings::get_listing))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(listing_state);

    // Booking routes (protected)
    let booking_state = bookings::BookingHandlerState {
        admission: Arc::clone(&deps.admission),
        repos: Arc::clone(&deps.repos),
    };
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/my", get(bookings::my_bookings))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .put(bookings::modify_booking)
                .delete(bookings::cancel_booking),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(booking_state);

    // Maintenance routes (admin only)
    let maintenance_state = maintenance::MaintenanceHandlerState {
        reconciliation: Arc::clone(&deps.reconciliation),
    };
    let maintenance_routes = Router::new()
        .route(
            "/reconcile-bookings",
            post(maintenance::reconcile_bookings),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(maintenance_state);

    let health_state = health::HealthState {
        db: deps.db,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = metrics::MetricsState {
        handle: deps.metrics_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check).with_state(health_state))
        // Prometheus scrape endpoint
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics_state),
        )
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Listings
        .nest("/api/v1/listings", listing_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Maintenance
        .nest("/api/v1/maintenance", maintenance_routes)
        // Middleware
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
