// src/app.rs
use crate::api::{CloudinaryUploader, GraphqlClient, HouseApi, ImageHost};
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::explore::ExploreSessions;

/// Everything a request handler needs, shared across astra workers.
pub struct App {
    pub db: Database,
    pub config: AppConfig,
    pub api: Box<dyn HouseApi>,
    pub images: Box<dyn ImageHost>,
    pub explore: ExploreSessions,
}

impl App {
    pub fn new(
        config: AppConfig,
        db: Database,
        api: Box<dyn HouseApi>,
        images: Box<dyn ImageHost>,
    ) -> Self {
        Self {
            explore: ExploreSessions::new(config.bounds_debounce, config.explore_idle),
            db,
            config,
            api,
            images,
        }
    }

    /// Wire the production GraphQL and Cloudinary clients from config.
    pub fn from_config(config: AppConfig) -> Self {
        let db = Database::new(config.db_path.clone());
        let api = Box::new(GraphqlClient::new(config.graphql_url.clone()));
        let images = Box::new(CloudinaryUploader::new(
            config.cloudinary_cloud_name.clone(),
            config.cloudinary_api_key.clone(),
        ));
        Self::new(config, db, api, images)
    }
}
