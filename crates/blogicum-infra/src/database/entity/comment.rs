//! Comment entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.created_at = ActiveValue::NotSet;
        }
        Ok(self)
    }
}

impl From<Model> for blogicum_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            author_id: model.author_id,
            post_id: model.post_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<blogicum_core::domain::Comment> for ActiveModel {
    fn from(comment: blogicum_core::domain::Comment) -> Self {
        Self {
            id: Set(comment.id),
            text: Set(comment.text),
            author_id: Set(comment.author_id),
            post_id: Set(comment.post_id),
            created_at: Set(comment.created_at.into()),
        }
    }
}
