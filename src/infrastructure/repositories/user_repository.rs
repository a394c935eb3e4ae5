//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::ensure_affected;
use crate::domain::{DomainError, Login, NewUser, Resource, User, UserPatch, UserRepository};
use crate::infrastructure::auth;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity, Model};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            login: model.login,
            name: model.name,
            contact_email: model.contact_email,
        }
    }
}

fn hash(password: &str) -> Result<String, DomainError> {
    auth::hash_password(password).map_err(DomainError::Internal)
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = UserEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find_by_id(login.as_str().to_string())
            .one(&self.db)
            .await?;

        Ok(user.map(User::from))
    }

    async fn create(&self, input: NewUser) -> Result<(), DomainError> {
        let password_hash = hash(&input.password)?;
        let txn = self.db.begin().await?;

        let user = ActiveModel {
            login: Set(input.login.into_inner()),
            password_hash: Set(password_hash),
            name: Set(input.name),
            contact_email: Set(input.contact_email),
        };
        UserEntity::insert(user).exec_without_returning(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn update(&self, login: &Login, patch: UserPatch) -> Result<(), DomainError> {
        let mut query = UserEntity::update_many()
            .col_expr(Column::Name, Expr::value(patch.name))
            .filter(Column::Login.eq(login.as_str()));

        if let Some(password) = patch.password {
            query = query.col_expr(Column::PasswordHash, Expr::value(hash(&password)?));
        }
        if let Some(email) = patch.contact_email {
            query = query.col_expr(Column::ContactEmail, Expr::value(email));
        }

        let txn = self.db.begin().await?;
        let result = query.exec(&txn).await?;
        ensure_affected(result.rows_affected, Resource::User)?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, login: &Login) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = UserEntity::delete_by_id(login.as_str().to_string())
            .exec(&txn)
            .await?;
        ensure_affected(result.rows_affected, Resource::User)?;

        txn.commit().await?;
        Ok(())
    }
}
