use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::ValidationErrors;

use crate::{
    config::config::Config,
    models::listing::Model as Listing,
    utils::{
        geo::{is_valid_latitude, is_valid_longitude, Coordinates},
        validation::{field_error, parse_number},
    },
};

/// Radius applied when a reference point is given without one.
pub const DEFAULT_RADIUS_KM: f64 = 25.0;

/// Raw `GET /services` query string. Values stay text until
/// [`SearchParams::into_query`] so malformed numbers surface as field errors.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub search: Option<String>,
}

impl SearchParams {
    pub fn into_query(self) -> Result<SearchQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let lat = parse_number(self.lat, "lat", &mut errors);
        let lng = parse_number(self.lng, "lng", &mut errors);
        let radius = parse_number(self.radius, "radius", &mut errors);
        let lat_malformed = errors.field_errors().contains_key("lat");
        let lng_malformed = errors.field_errors().contains_key("lng");

        let reference = match (lat, lng) {
            (Some(latitude), Some(longitude)) => {
                if !is_valid_latitude(latitude) {
                    errors.add(
                        "lat",
                        field_error("range", "The lat must be between -90 and 90."),
                    );
                }
                if !is_valid_longitude(longitude) {
                    errors.add(
                        "lng",
                        field_error("range", "The lng must be between -180 and 180."),
                    );
                }
                Some(Coordinates::new(latitude, longitude))
            }
            (Some(_), None) if !lng_malformed => {
                errors.add(
                    "lng",
                    field_error("required_with", "The lng field is required when lat is present."),
                );
                None
            }
            (None, Some(_)) if !lat_malformed => {
                errors.add(
                    "lat",
                    field_error("required_with", "The lat field is required when lng is present."),
                );
                None
            }
            _ => None,
        };

        if let Some(radius) = radius {
            if radius <= 0.0 {
                errors.add(
                    "radius",
                    field_error("positive", "The radius must be a positive number."),
                );
            }
        }

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(SearchQuery {
            reference,
            radius_km: radius,
            term: self.search,
        })
    }
}

/// A validated search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub reference: Option<Coordinates>,
    pub radius_km: Option<f64>,
    pub term: Option<String>,
}

impl SearchQuery {
    pub fn near(reference: Coordinates) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    pub fn within(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    pub fn matching(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }
}

/// A listing that passed the search, with its distance from the reference
/// point when one was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingHit {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProximitySearchEngine {
    default_radius_km: f64,
    case_sensitive: bool,
}

impl Default for ProximitySearchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_KM, true)
    }
}

impl ProximitySearchEngine {
    pub fn new(default_radius_km: f64, case_sensitive: bool) -> Self {
        Self {
            default_radius_km,
            case_sensitive,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_radius_km, config.search_case_sensitive)
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Radius in effect for `query`, or `None` when no distance filtering applies.
    pub fn effective_radius(&self, query: &SearchQuery) -> Option<f64> {
        query
            .reference
            .map(|_| query.radius_km.unwrap_or(self.default_radius_km))
    }

    /// Substring containment on the title, `LIKE '%term%'` style.
    pub fn title_matches(&self, title: &str, term: &str) -> bool {
        if self.case_sensitive {
            title.contains(term)
        } else {
            title.to_lowercase().contains(&term.to_lowercase())
        }
    }

    /// Filters `listings` down to those satisfying `query`, keeping their order.
    ///
    /// The radius predicate is strict: a listing exactly `radius` km away is
    /// excluded. Ungeocoded listings never pass a radius query.
    pub fn search<I>(&self, listings: I, query: &SearchQuery) -> Vec<ListingHit>
    where
        I: IntoIterator<Item = Listing>,
    {
        let radius = self.effective_radius(query);
        if query.radius_km.is_some() && radius.is_none() {
            debug!("radius supplied without a reference point, ignoring it");
        }

        listings
            .into_iter()
            .filter(|listing| match &query.term {
                Some(term) => self.title_matches(&listing.title, term),
                None => true,
            })
            .filter_map(|listing| match (query.reference, radius) {
                (Some(reference), Some(radius)) => {
                    let distance = reference.distance_km(&listing.coordinates()?);
                    (distance < radius).then_some(ListingHit {
                        listing,
                        distance: Some(distance),
                    })
                }
                _ => Some(ListingHit {
                    listing,
                    distance: None,
                }),
            })
            .collect()
    }
}
