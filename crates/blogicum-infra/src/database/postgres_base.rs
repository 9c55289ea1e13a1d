use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, Select, SqlErr,
};

use blogicum_core::Validate;
use blogicum_core::error::RepoError;
use blogicum_core::ports::BaseRepository;

/// Entities with a default listing order.
pub trait OrderedEntity: EntityTrait {
    /// `SELECT` over the whole table in default order.
    fn ordered() -> Select<Self>;
}

/// Generic PostgreSQL repository implementation.
///
/// Delete policies (cascade / set null) are enforced by the foreign keys
/// created in the migrations.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Column behind a unique violation message.
///
/// Postgres names single-column unique constraints `<table>_<column>_key`;
/// table names here contain no underscore. Unknown formats pass through.
pub(crate) fn unique_column(detail: &str) -> String {
    detail
        .split('"')
        .nth(1)
        .and_then(|constraint| constraint.strip_suffix("_key"))
        .and_then(|name| name.split_once('_'))
        .map(|(_, column)| column.to_string())
        .unwrap_or_else(|| detail.to_string())
}

/// Translate a SeaORM error into the repository error space.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            RepoError::Duplicate(unique_column(&detail))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => RepoError::Constraint(detail),
        _ => match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: OrderedEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Validate + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<T>, RepoError> {
        let rows = E::ordered().all(&self.db).await.map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, entity: T) -> Result<T, RepoError> {
        entity.validate()?;

        let active_model: E::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        entity.validate()?;

        let active_model: E::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
