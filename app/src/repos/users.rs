use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::models::user::{self, ActiveModel, Entity as UserEntity, Model as User};

pub struct UsersRepo {
    db: DatabaseConnection,
}

impl UsersRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String, email: String) -> Result<User, DbErr> {
        let user_model = ActiveModel {
            id: Set(nanoid::nanoid!()),
            name: Set(name),
            email: Set(email),
            created_at: Set(Utc::now().naive_utc()),
        };

        user_model.insert(&self.db).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, DbErr> {
        let user = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        match user {
            Some(u) => Ok(u),
            None => Err(DbErr::RecordNotFound(format!(
                "User with the email {} not found",
                email
            ))),
        }
    }
}
