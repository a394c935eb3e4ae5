use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::data::endpoint_directory,
        api::states::list_states,
        api::states::get_state,
        api::states::create_state,
        api::states::update_state,
        api::states::delete_state,
        api::cities::list_cities,
        api::cities::get_city,
        api::cities::create_city,
        api::cities::update_city,
        api::cities::delete_city,
        api::neighborhoods::list_neighborhoods,
        api::neighborhoods::get_neighborhood,
        api::neighborhoods::create_neighborhood,
        api::neighborhoods::update_neighborhood,
        api::neighborhoods::delete_neighborhood,
        api::users::list_users,
        api::users::get_user,
        api::users::create_user,
        api::users::update_user,
        api::users::delete_user,
        api::authors::list_authors,
        api::authors::get_author,
        api::authors::create_author,
        api::authors::update_author,
        api::authors::delete_author,
        api::categories::list_categories,
        api::categories::get_category,
        api::categories::create_category,
        api::categories::update_category,
        api::categories::delete_category,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::lookup::lookup_postal_code,
    ),
    tags(
        (name = "sebo", description = "Second-hand book marketplace API")
    )
)]
pub struct ApiDoc;
