//! Repository implementations using SeaORM
//!
//! Every write runs inside one transaction that is committed only when all
//! its statements succeed; returning early drops the transaction, which
//! rolls it back.

pub mod author_repository;
pub mod book_repository;
pub mod category_repository;
pub mod city_repository;
pub mod neighborhood_repository;
pub mod state_repository;
pub mod user_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_repository::SeaOrmBookRepository;
pub use category_repository::SeaOrmCategoryRepository;
pub use city_repository::SeaOrmCityRepository;
pub use neighborhood_repository::SeaOrmNeighborhoodRepository;
pub use state_repository::SeaOrmStateRepository;
pub use user_repository::SeaOrmUserRepository;

use crate::domain::{DomainError, Resource};

/// Update and delete detect a missing row by observing zero affected rows.
pub(crate) fn ensure_affected(rows_affected: u64, resource: Resource) -> Result<(), DomainError> {
    if rows_affected == 0 {
        return Err(DomainError::NotFound(resource));
    }
    Ok(())
}
