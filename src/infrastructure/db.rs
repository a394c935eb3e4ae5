use std::str::FromStr;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector, Statement,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS ESTADO (
        ID_ESTADO INTEGER PRIMARY KEY AUTOINCREMENT,
        NM_ESTADO TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS CIDADE (
        ID_CIDADE INTEGER PRIMARY KEY AUTOINCREMENT,
        NM_CIDADE TEXT NOT NULL,
        ID_ESTADO INTEGER NOT NULL,
        FOREIGN KEY (ID_ESTADO) REFERENCES ESTADO(ID_ESTADO)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS BAIRRO (
        CEP INTEGER PRIMARY KEY,
        NM_BAIRRO TEXT NOT NULL,
        ID_CIDADE INTEGER NOT NULL,
        FOREIGN KEY (ID_CIDADE) REFERENCES CIDADE(ID_CIDADE)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS USUARIO (
        LOGIN TEXT PRIMARY KEY,
        SENHA TEXT NOT NULL,
        NM_USUARIO TEXT NOT NULL,
        EMAIL_CONTATO TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS AUTOR (
        ID_AUTOR INTEGER PRIMARY KEY AUTOINCREMENT,
        NM_AUTOR TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS CATEGORIA (
        ID_CATEGORIA INTEGER PRIMARY KEY AUTOINCREMENT,
        NM_CATEGORIA TEXT NOT NULL,
        IMG_CATEGORIA BLOB
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS LIVRO (
        ID_LIVRO INTEGER PRIMARY KEY AUTOINCREMENT,
        NM_LIVRO TEXT NOT NULL,
        PRECO REAL NOT NULL,
        PAGAMENTO_ELETRONICO BOOLEAN NOT NULL,
        PAGAMENTO_DINHEIRO BOOLEAN NOT NULL,
        ENTREGA_PRESENCIAL BOOLEAN NOT NULL,
        ENTREGA_DELIVERY BOOLEAN NOT NULL,
        IMG_LIVRO BLOB NOT NULL,
        CEP INTEGER NOT NULL,
        LOGIN_COMPRADOR TEXT NOT NULL,
        LOGIN_VENDEDOR TEXT NOT NULL,
        FOREIGN KEY (CEP) REFERENCES BAIRRO(CEP),
        FOREIGN KEY (LOGIN_COMPRADOR) REFERENCES USUARIO(LOGIN),
        FOREIGN KEY (LOGIN_VENDEDOR) REFERENCES USUARIO(LOGIN)
    )
    "#,
    // Join tables carry no uniqueness constraint and no cascade; book
    // deletion clears them explicitly.
    r#"
    CREATE TABLE IF NOT EXISTS LIVRO_AUTOR (
        ID_AUTOR INTEGER NOT NULL,
        ID_LIVRO INTEGER NOT NULL,
        FOREIGN KEY (ID_AUTOR) REFERENCES AUTOR(ID_AUTOR),
        FOREIGN KEY (ID_LIVRO) REFERENCES LIVRO(ID_LIVRO)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS LIVRO_CATEGORIA (
        ID_CATEGORIA INTEGER NOT NULL,
        ID_LIVRO INTEGER NOT NULL,
        FOREIGN KEY (ID_CATEGORIA) REFERENCES CATEGORIA(ID_CATEGORIA),
        FOREIGN KEY (ID_LIVRO) REFERENCES LIVRO(ID_LIVRO)
    )
    "#,
];

// Dependents first.
const DROP_ORDER: &[&str] = &[
    "LIVRO_CATEGORIA",
    "LIVRO_AUTOR",
    "LIVRO",
    "CATEGORIA",
    "AUTOR",
    "USUARIO",
    "BAIRRO",
    "CIDADE",
    "ESTADO",
];

/// Connect and make sure the schema exists.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect(database_url).await?;

    run_migrations(&db).await?;

    Ok(db)
}

/// Drop every table and recreate the schema from scratch.
pub async fn reset_db(db: &DatabaseConnection) -> Result<(), DbErr> {
    for table in DROP_ORDER {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            format!("DROP TABLE IF EXISTS {}", table),
        ))
        .await?;
    }
    tracing::warn!("Database reset: all tables dropped");

    run_migrations(db).await
}

async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?
        .foreign_keys(true);

    // Every connection to `:memory:` opens a distinct database, so the pool
    // must hold exactly one connection and never recycle it.
    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;

    tracing::debug!("Connected to {}", database_url);

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    for ddl in TABLES {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            ddl.to_string(),
        ))
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::FromQueryResult;

    #[derive(Debug, FromQueryResult)]
    struct Pragma {
        foreign_keys: i32,
    }

    async fn table_count(db: &DatabaseConnection) -> i64 {
        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'"
                    .to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get::<i64>("", "n").unwrap()
    }

    #[tokio::test]
    async fn init_creates_every_table_and_is_idempotent() {
        let db = init_db("sqlite::memory:").await.unwrap();
        assert_eq!(table_count(&db).await, TABLES.len() as i64);

        run_migrations(&db).await.unwrap();
        assert_eq!(table_count(&db).await, TABLES.len() as i64);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = init_db("sqlite::memory:").await.unwrap();
        let pragma = Pragma::find_by_statement(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA foreign_keys".to_string(),
        ))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
        assert_eq!(pragma.foreign_keys, 1);
    }

    #[tokio::test]
    async fn reset_recreates_empty_tables() {
        let db = init_db("sqlite::memory:").await.unwrap();
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "INSERT INTO ESTADO (NM_ESTADO) VALUES ('Bahia')".to_string(),
        ))
        .await
        .unwrap();

        reset_db(&db).await.unwrap();

        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM ESTADO".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.try_get::<i64>("", "n").unwrap(), 0);
    }
}
