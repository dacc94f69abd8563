use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Select,
};

use crate::{
    models::listing::{self, ActiveModel, Entity as ListingEntity, Model as Listing},
    services::search::{ProximitySearchEngine, SearchQuery},
};

#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Fields to overwrite on update. `None` leaves the stored value untouched,
/// so an update can move a listing's coordinates but never clear them; a
/// geocoded listing stays geocoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ListingChanges {
    fn apply(self, model: &mut ActiveModel) {
        if let Some(title) = self.title {
            model.title = Set(title);
        }
        if let Some(description) = self.description {
            model.description = Set(description);
        }
        if let Some(address) = self.address {
            model.address = Set(address);
        }
        if let Some(city) = self.city {
            model.city = Set(city);
        }
        if let Some(state) = self.state {
            model.state = Set(state);
        }
        if let Some(zipcode) = self.zipcode {
            model.zipcode = Set(zipcode);
        }
        if let Some(latitude) = self.latitude {
            model.latitude = Set(Some(latitude));
        }
        if let Some(longitude) = self.longitude {
            model.longitude = Set(Some(longitude));
        }
    }
}

pub struct ListingsRepo {
    db: DatabaseConnection,
}

impl ListingsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewListing) -> Result<Listing, DbErr> {
        let now = Utc::now().naive_utc();

        let listing_model = ActiveModel {
            id: Set(nanoid::nanoid!()),
            title: Set(new.title),
            description: Set(new.description),
            address: Set(new.address),
            city: Set(new.city),
            state: Set(new.state),
            zipcode: Set(new.zipcode),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            created_at: Set(now),
            updated_at: Set(now),
        };

        listing_model.insert(&self.db).await
    }

    pub async fn get(&self, listing_id: &str) -> Result<Listing, DbErr> {
        ListingEntity::find_by_id(listing_id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotFound("Service not found".to_string()))
    }

    pub async fn update(&self, listing_id: &str, changes: ListingChanges) -> Result<Listing, DbErr> {
        let listing = self.get(listing_id).await?;

        let mut listing: ActiveModel = listing.into();
        changes.apply(&mut listing);
        listing.updated_at = Set(Utc::now().naive_utc());

        listing.update(&self.db).await
    }

    pub async fn delete(&self, listing_id: &str) -> Result<(), DbErr> {
        let result = ListingEntity::delete_by_id(listing_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("Service not found".to_string()));
        }
        Ok(())
    }

    pub async fn all(&self) -> Result<Vec<Listing>, DbErr> {
        Self::in_store_order(ListingEntity::find()).all(&self.db).await
    }

    /// Superset of the listings that can satisfy `query`.
    ///
    /// Only coarse predicates are pushed into SQL; the engine re-checks every
    /// row, so the narrowing here must never drop a real match.
    pub async fn candidates(
        &self,
        engine: &ProximitySearchEngine,
        query: &SearchQuery,
    ) -> Result<Vec<Listing>, DbErr> {
        let mut select = ListingEntity::find();

        if query.reference.is_some() {
            select = select
                .filter(listing::Column::Latitude.is_not_null())
                .filter(listing::Column::Longitude.is_not_null());
        }

        // Backslash is the default LIKE escape in Postgres
        if let Some(term) = query.term.as_deref() {
            if engine.is_case_sensitive() && !term.is_empty() && !term.contains('\\') {
                select = select.filter(listing::Column::Title.contains(term));
            }
        }

        Self::in_store_order(select).all(&self.db).await
    }

    fn in_store_order(select: Select<ListingEntity>) -> Select<ListingEntity> {
        select
            .order_by_asc(listing::Column::CreatedAt)
            .order_by_asc(listing::Column::Id)
    }
}
