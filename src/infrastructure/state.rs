//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    AuthorRepository, BookRepository, CategoryRepository, CityRepository, NeighborhoodRepository,
    StateRepository, UserRepository,
};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookRepository, SeaOrmCategoryRepository, SeaOrmCityRepository,
    SeaOrmNeighborhoodRepository, SeaOrmStateRepository, SeaOrmUserRepository,
};
use crate::modules::integrations::brasil_api::BrasilApiClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub state_repo: Arc<dyn StateRepository>,
    pub city_repo: Arc<dyn CityRepository>,
    pub neighborhood_repo: Arc<dyn NeighborhoodRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub author_repo: Arc<dyn AuthorRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub book_repo: Arc<dyn BookRepository>,
    /// External postal-code lookup
    pub postal_lookup: BrasilApiClient,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, postal_lookup: BrasilApiClient) -> Self {
        Self {
            state_repo: Arc::new(SeaOrmStateRepository::new(db.clone())),
            city_repo: Arc::new(SeaOrmCityRepository::new(db.clone())),
            neighborhood_repo: Arc::new(SeaOrmNeighborhoodRepository::new(db.clone())),
            user_repo: Arc::new(SeaOrmUserRepository::new(db.clone())),
            author_repo: Arc::new(SeaOrmAuthorRepository::new(db.clone())),
            category_repo: Arc::new(SeaOrmCategoryRepository::new(db.clone())),
            book_repo: Arc::new(SeaOrmBookRepository::new(db)),
            postal_lookup,
        }
    }
}
