use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};
use validator::{Validate, ValidationErrors};

use crate::{
    core::state::AppState,
    middlewares::auth::AuthUser,
    models::listing::Model as Listing,
    repos::listings::{ListingChanges, ListingsRepo, NewListing},
    services::search::{ListingHit, SearchParams},
    utils::{
        geo::{is_valid_latitude, is_valid_longitude},
        response::{APIError, APIResponse},
        validation::{field_error, present, trimmed, Numeric},
    },
};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(
        required(message = "The title field is required."),
        length(min = 3, message = "The title must be at least 3 characters.")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "The description field is required."),
        length(min = 3, message = "The description must be at least 3 characters.")
    )]
    pub description: Option<String>,
    #[validate(required(message = "The address field is required."))]
    pub address: Option<String>,
    #[validate(required(message = "The city field is required."))]
    pub city: Option<String>,
    #[validate(required(message = "The state field is required."))]
    pub state: Option<String>,
    #[validate(required(message = "The zipcode field is required."))]
    pub zipcode: Option<String>,
    pub latitude: Option<Numeric>,
    pub longitude: Option<Numeric>,
}

impl CreateListingRequest {
    /// Trims text fields and drops blank ones before validation.
    pub fn normalized(self) -> Self {
        Self {
            title: present(self.title),
            description: present(self.description),
            address: present(self.address),
            city: present(self.city),
            state: present(self.state),
            zipcode: present(self.zipcode),
            ..self
        }
    }

    /// Normalizes and validates the request, collecting every field error.
    pub fn validated(self) -> Result<NewListing, ValidationErrors> {
        let request = self.normalized();
        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
        let (latitude, longitude) = coordinates(request.latitude, request.longitude, &mut errors);

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(NewListing {
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            address: request.address.unwrap_or_default(),
            city: request.city.unwrap_or_default(),
            state: request.state.unwrap_or_default(),
            zipcode: request.zipcode.unwrap_or_default(),
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(min = 3, message = "The title must be at least 3 characters."))]
    pub title: Option<String>,
    #[validate(length(min = 3, message = "The description must be at least 3 characters."))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "The address field is required."))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "The city field is required."))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "The state field is required."))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "The zipcode field is required."))]
    pub zipcode: Option<String>,
    pub latitude: Option<Numeric>,
    pub longitude: Option<Numeric>,
}

impl UpdateListingRequest {
    /// Trims supplied text fields; a supplied blank value still fails validation.
    pub fn normalized(self) -> Self {
        Self {
            title: trimmed(self.title),
            description: trimmed(self.description),
            address: trimmed(self.address),
            city: trimmed(self.city),
            state: trimmed(self.state),
            zipcode: trimmed(self.zipcode),
            ..self
        }
    }

    /// Normalizes and validates the supplied fields. Blank or `null`
    /// coordinates leave the stored ones unchanged.
    pub fn validated(self) -> Result<ListingChanges, ValidationErrors> {
        let request = self.normalized();
        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
        let (latitude, longitude) = coordinates(request.latitude, request.longitude, &mut errors);

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(ListingChanges {
            title: request.title,
            description: request.description,
            address: request.address,
            city: request.city,
            state: request.state,
            zipcode: request.zipcode,
            latitude,
            longitude,
        })
    }
}

/// Resolves submitted coordinates, adding `numeric` or `range` errors per field.
fn coordinates(
    latitude: Option<Numeric>,
    longitude: Option<Numeric>,
    errors: &mut ValidationErrors,
) -> (Option<f64>, Option<f64>) {
    let latitude = Numeric::parse(latitude, "latitude", errors);
    if latitude.is_some_and(|value| !is_valid_latitude(value)) {
        errors.add(
            "latitude",
            field_error("range", "The latitude must be between -90 and 90."),
        );
    }

    let longitude = Numeric::parse(longitude, "longitude", errors);
    if longitude.is_some_and(|value| !is_valid_longitude(value)) {
        errors.add(
            "longitude",
            field_error("range", "The longitude must be between -180 and 180."),
        );
    }

    (latitude, longitude)
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<ListingHit>>, APIError> {
    let Query(params) = params?;
    let query = params.into_query()?;
    let listings_repo = ListingsRepo::new(state.database.clone());

    let candidates = listings_repo.candidates(&state.search, &query).await?;
    let scanned = candidates.len();
    let hits = state.search.search(candidates, &query);

    debug!(
        scanned,
        matched = hits.len(),
        radius_km = ?state.search.effective_radius(&query),
        "Service search completed"
    );

    Ok(Json(hits))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> Result<Json<Listing>, APIError> {
    let listings_repo = ListingsRepo::new(state.database.clone());
    let listing = listings_repo.get(&service_id).await?;

    Ok(Json(listing))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateListingRequest>, JsonRejection>,
) -> Result<APIResponse, APIError> {
    let Json(payload) = payload?;
    let new_listing = payload.validated()?;

    let listings_repo = ListingsRepo::new(state.database.clone());
    let listing = listings_repo.create(new_listing).await?;
    info!("Service {} created by {}", listing.id, user.email);

    Ok(APIResponse::Message("Services Created"))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(service_id): Path<String>,
    payload: Result<Json<UpdateListingRequest>, JsonRejection>,
) -> Result<APIResponse, APIError> {
    let Json(payload) = payload?;
    let changes = payload.validated()?;

    let listings_repo = ListingsRepo::new(state.database.clone());
    let listing = listings_repo.update(&service_id, changes).await?;
    info!("Service {} updated by {}", listing.id, user.email);

    Ok(APIResponse::Message("Service Updated"))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(service_id): Path<String>,
) -> Result<APIResponse, APIError> {
    let listings_repo = ListingsRepo::new(state.database.clone());
    listings_repo.delete(&service_id).await?;
    info!("Service {} deleted by {}", service_id, user.email);

    Ok(APIResponse::Message("Service Deleted"))
}
