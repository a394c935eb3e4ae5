pub mod authors;
pub mod books;
pub mod categories;
pub mod cities;
pub mod data;
pub mod error;
pub mod health;
pub mod lookup;
pub mod neighborhoods;
pub mod states;
pub mod users;
pub mod wire;

use axum::{routing::get, Router};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Service
        .route("/health", get(health::health_check))
        .route("/dados", get(data::endpoint_directory))
        // States
        .route(
            "/estados",
            get(states::list_states).post(states::create_state),
        )
        .route(
            "/estados/:id",
            get(states::get_state)
                .put(states::update_state)
                .delete(states::delete_state),
        )
        // Cities
        .route(
            "/cidades",
            get(cities::list_cities).post(cities::create_city),
        )
        .route(
            "/cidades/:id",
            get(cities::get_city)
                .put(cities::update_city)
                .delete(cities::delete_city),
        )
        // Neighborhoods
        .route(
            "/bairros",
            get(neighborhoods::list_neighborhoods).post(neighborhoods::create_neighborhood),
        )
        .route(
            "/bairros/:cep",
            get(neighborhoods::get_neighborhood)
                .put(neighborhoods::update_neighborhood)
                .delete(neighborhoods::delete_neighborhood),
        )
        // Users
        .route("/usuarios", get(users::list_users).post(users::create_user))
        .route(
            "/usuarios/:login",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Authors
        .route(
            "/autores",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/autores/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Categories
        .route(
            "/categorias",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categorias/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Books
        .route("/livros", get(books::list_books).post(books::create_book))
        .route(
            "/livros/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Postal-code lookup
        .route("/cep/:cep", get(lookup::lookup_postal_code))
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .with_state(state)
}
