mod common;

use axum::{Router, http::StatusCode};
use common::{seed_location, seed_user, send, setup_app};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use sebo::models::{book, book_authors, book_categories};
use serde_json::{Value, json};

// "fake_image_data"
const IMAGE: &str = "ZmFrZV9pbWFnZV9kYXRh";

struct Fixture {
    app: Router,
    db: DatabaseConnection,
    authors: Vec<i64>,
    categories: Vec<i64>,
}

async fn setup_fixture() -> Fixture {
    let (app, db) = setup_app().await;
    seed_location(&app).await;
    seed_user(&app, "ana").await;
    seed_user(&app, "bruno").await;

    let mut authors = Vec::new();
    for name in ["Machado de Assis", "Clarice Lispector", "Jorge Amado"] {
        let (_, body) = send(&app, "POST", "/autores", Some(json!({ "nm_autor": name }))).await;
        authors.push(body["id_autor"].as_i64().unwrap());
    }

    let mut categories = Vec::new();
    for name in ["Romance", "Clássico"] {
        let (_, body) = send(
            &app,
            "POST",
            "/categorias",
            Some(json!({ "nm_categoria": name, "img_categoria": IMAGE })),
        )
        .await;
        categories.push(body["id_categoria"].as_i64().unwrap());
    }

    Fixture {
        app,
        db,
        authors,
        categories,
    }
}

fn book_payload(authors: &[i64], categories: &[i64]) -> Value {
    json!({
        "nm_livro": "Dom Casmurro",
        "preco": 35.5,
        "pagamento_eletronico": true,
        "pagamento_dinheiro": "N",
        "entrega_presencial": "S",
        "entrega_delivery": false,
        "img_livro": IMAGE,
        "cep": 40070110,
        "login_comprador": "ana",
        "login_vendedor": "bruno",
        "autores": authors,
        "categorias": categories
    })
}

fn ids(list: &Value, key: &str) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item[key].as_i64().unwrap())
        .collect()
}

async fn author_links(db: &DatabaseConnection, book_id: i64) -> u64 {
    book_authors::Entity::find()
        .filter(book_authors::Column::BookId.eq(book_id as i32))
        .count(db)
        .await
        .unwrap()
}

async fn category_links(db: &DatabaseConnection, book_id: i64) -> u64 {
    book_categories::Entity::find()
        .filter(book_categories::Column::BookId.eq(book_id as i32))
        .count(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_and_fetch_book() {
    let f = setup_fixture().await;

    let (status, created) = send(
        &f.app,
        "POST",
        "/livros",
        Some(book_payload(&f.authors[..2], &f.categories[..1])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Livro criado com sucesso");

    let (status, body) = send(
        &f.app,
        "GET",
        &format!("/livros/{}", created["id_livro"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["NM_LIVRO"], "Dom Casmurro");
    assert_eq!(body["PRECO"], 35.5);
    assert_eq!(body["PAGAMENTO_ELETRONICO"], true);
    assert_eq!(body["PAGAMENTO_DINHEIRO"], false);
    assert_eq!(body["ENTREGA_PRESENCIAL"], true);
    assert_eq!(body["ENTREGA_DELIVERY"], false);
    assert_eq!(body["IMG_LIVRO"], IMAGE);
    assert_eq!(body["NM_BAIRRO"], "Centro");
    assert_eq!(body["NM_CIDADE"], "Salvador");
    assert_eq!(body["NM_ESTADO"], "Bahia");
    assert_eq!(body["LOGIN_VENDEDOR"], "bruno");

    // Associations come back ordered by name
    let author_names: Vec<&str> = body["autores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["NM_AUTOR"].as_str().unwrap())
        .collect();
    assert_eq!(author_names, vec!["Clarice Lispector", "Machado de Assis"]);
    assert_eq!(ids(&body["categorias"], "ID_CATEGORIA"), vec![f.categories[0]]);
    assert!(body["categorias"][0].get("IMG_CATEGORIA").is_none());

    // Listing carries location names but no image
    let (_, listing) = send(&f.app, "GET", "/livros", None).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["NM_BAIRRO"], "Centro");
    assert!(listing[0].get("IMG_LIVRO").is_none());
}

#[tokio::test]
async fn test_create_without_associations() {
    let f = setup_fixture().await;
    let mut payload = book_payload(&[], &[]);
    payload.as_object_mut().unwrap().remove("autores");
    payload.as_object_mut().unwrap().remove("categorias");

    let (status, created) = send(&f.app, "POST", "/livros", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&f.app, "GET", &format!("/livros/{}", created["id_livro"]), None).await;
    assert_eq!(body["autores"], json!([]));
    assert_eq!(body["categorias"], json!([]));
}

#[tokio::test]
async fn test_missing_field_names_it() {
    let f = setup_fixture().await;
    let mut payload = book_payload(&[], &[]);
    payload.as_object_mut().unwrap().remove("login_vendedor");

    let (status, body) = send(&f.app, "POST", "/livros", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "login_vendedor é obrigatório");
    assert_eq!(book::Entity::find().count(&f.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_create_leaves_no_partial_book() {
    let f = setup_fixture().await;

    let (status, body) = send(
        &f.app,
        "POST",
        "/livros",
        Some(book_payload(&[f.authors[0], 999], &[])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("FOREIGN KEY"));

    assert_eq!(book::Entity::find().count(&f.db).await.unwrap(), 0);
    assert_eq!(book_authors::Entity::find().count(&f.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_buyer_is_rejected() {
    let f = setup_fixture().await;
    let mut payload = book_payload(&[], &[]);
    payload["login_comprador"] = json!("fantasma");

    let (status, _) = send(&f.app, "POST", "/livros", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(book::Entity::find().count(&f.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_replaces_author_set() {
    let f = setup_fixture().await;
    let (_, created) = send(
        &f.app,
        "POST",
        "/livros",
        Some(book_payload(&f.authors[..1], &f.categories)),
    )
    .await;
    let uri = format!("/livros/{}", created["id_livro"]);

    let (status, body) = send(
        &f.app,
        "PUT",
        &uri,
        Some(json!({ "autores": &f.authors[1..] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Livro atualizado com sucesso");

    let (_, body) = send(&f.app, "GET", &uri, None).await;
    let mut authors = ids(&body["autores"], "ID_AUTOR");
    authors.sort();
    assert_eq!(authors, f.authors[1..].to_vec());
    // Categories untouched when absent from the patch
    assert_eq!(body["categorias"].as_array().unwrap().len(), 2);
    assert_eq!(body["NM_LIVRO"], "Dom Casmurro");

    // An empty list clears the set
    let (status, _) = send(&f.app, "PUT", &uri, Some(json!({ "categorias": [] }))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&f.app, "GET", &uri, None).await;
    assert_eq!(body["categorias"], json!([]));
}

#[tokio::test]
async fn test_partial_update_changes_only_given_columns() {
    let f = setup_fixture().await;
    let (_, created) = send(
        &f.app,
        "POST",
        "/livros",
        Some(book_payload(&f.authors[..1], &[])),
    )
    .await;
    let uri = format!("/livros/{}", created["id_livro"]);

    let (status, _) = send(
        &f.app,
        "PUT",
        &uri,
        Some(json!({ "preco": 10.0, "entrega_delivery": "S", "login_comprador": "bruno" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&f.app, "GET", &uri, None).await;
    assert_eq!(body["PRECO"], 10.0);
    assert_eq!(body["ENTREGA_DELIVERY"], true);
    assert_eq!(body["LOGIN_COMPRADOR"], "bruno");
    assert_eq!(body["NM_LIVRO"], "Dom Casmurro");
    assert_eq!(body["IMG_LIVRO"], IMAGE);
    assert_eq!(ids(&body["autores"], "ID_AUTOR"), vec![f.authors[0]]);
}

#[tokio::test]
async fn test_failed_update_rolls_back_associations() {
    let f = setup_fixture().await;
    let (_, created) = send(
        &f.app,
        "POST",
        "/livros",
        Some(book_payload(&f.authors[..1], &[])),
    )
    .await;
    let book_id = created["id_livro"].as_i64().unwrap();
    let uri = format!("/livros/{}", book_id);

    let (status, _) = send(
        &f.app,
        "PUT",
        &uri,
        Some(json!({ "nm_livro": "Outro", "autores": [999] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&f.app, "GET", &uri, None).await;
    assert_eq!(body["NM_LIVRO"], "Dom Casmurro");
    assert_eq!(ids(&body["autores"], "ID_AUTOR"), vec![f.authors[0]]);
    assert_eq!(author_links(&f.db, book_id).await, 1);
}

#[tokio::test]
async fn test_update_edge_cases() {
    let f = setup_fixture().await;
    let (_, created) = send(&f.app, "POST", "/livros", Some(book_payload(&[], &[]))).await;
    let uri = format!("/livros/{}", created["id_livro"]);

    let (status, body) = send(&f.app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Dados são obrigatórios");

    let (status, body) = send(&f.app, "PUT", &uri, Some(json!({ "img_livro": "***" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Imagem deve estar em base64");

    let (status, body) = send(&f.app, "PUT", &uri, Some(json!({ "nm_livro": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "nm_livro é obrigatório");
    let (_, stored) = send(&f.app, "GET", &uri, None).await;
    assert_eq!(stored["NM_LIVRO"], "Dom Casmurro");

    let (status, _) = send(&f.app, "PUT", "/livros/999", Some(json!({ "nm_livro": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&f.app, "PUT", "/livros/999", Some(json!({ "autores": [] }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_join_rows() {
    let f = setup_fixture().await;
    let (_, created) = send(
        &f.app,
        "POST",
        "/livros",
        Some(book_payload(&f.authors, &f.categories)),
    )
    .await;
    let book_id = created["id_livro"].as_i64().unwrap();
    assert_eq!(author_links(&f.db, book_id).await, 3);
    assert_eq!(category_links(&f.db, book_id).await, 2);

    let uri = format!("/livros/{}", book_id);
    let (status, body) = send(&f.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Livro deletado com sucesso");

    assert_eq!(author_links(&f.db, book_id).await, 0);
    assert_eq!(category_links(&f.db, book_id).await, 0);
    let (status, _) = send(&f.app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Authors survive and, unlinked, can now be deleted
    let (status, _) = send(&f.app, "DELETE", &format!("/autores/{}", f.authors[0]), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_linked_author_cannot_be_deleted() {
    let f = setup_fixture().await;
    send(&f.app, "POST", "/livros", Some(book_payload(&f.authors[..1], &[]))).await;

    let (status, _) = send(&f.app, "DELETE", &format!("/autores/{}", f.authors[0]), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
