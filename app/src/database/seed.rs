use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::{config::config::Config, repos::users::UsersRepo};

/// Ensures the configured default user exists so bearer tokens minted for it
/// resolve to a principal.
pub async fn seed_default_user(db: &DatabaseConnection, config: &Config) -> Result<(), DbErr> {
    let Some(email) = config.seed_user_email.clone() else {
        return Ok(());
    };

    let users_repo = UsersRepo::new(db.clone());
    if users_repo.get_by_email(&email).await.is_ok() {
        info!("Default user already exists");
        return Ok(());
    }

    let name = config
        .seed_user_name
        .clone()
        .unwrap_or_else(|| email.clone());
    let _user = users_repo.create(name, email.clone()).await?;
    info!("Created default user: {}", email);

    Ok(())
}
