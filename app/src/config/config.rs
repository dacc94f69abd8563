use std::net::IpAddr;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_server_ip")]
    pub server_ip: IpAddr,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    pub jwt_secret: String,

    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_search_case_sensitive")]
    pub search_case_sensitive: bool,

    pub seed_user_email: Option<String>,
    pub seed_user_name: Option<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_server_ip() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    2
}
fn default_radius_km() -> f64 {
    crate::services::search::DEFAULT_RADIUS_KM
}
fn default_search_case_sensitive() -> bool {
    true
}

impl Config {
    pub fn load_envs() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}
