//! Users, categories, locations, posts and comments.
//!
//! Posts and comments go away with their author; comments go away with
//! their post; a deleted category or location only detaches its posts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_users()).await?;
        manager.create_table(create_categories()).await?;
        manager.create_table(create_locations()).await?;
        manager.create_table(create_posts()).await?;
        manager.create_table(create_comments()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_pub_date")
                    .table(Posts::Table)
                    .col(Posts::PubDate)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_created_at")
                    .table(Comments::Table)
                    .col(Comments::PostId)
                    .col(Comments::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn created_at<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

fn create_users() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
        .col(
            ColumnDef::new(Users::Username)
                .string_len(256)
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Users::Email).string_len(256).not_null())
        .col(&mut created_at(Users::CreatedAt))
        .to_owned()
}

fn create_categories() -> TableCreateStatement {
    Table::create()
        .table(Categories::Table)
        .if_not_exists()
        .col(ColumnDef::new(Categories::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Categories::Title).string_len(256).not_null())
        .col(ColumnDef::new(Categories::Description).text().not_null())
        .col(
            ColumnDef::new(Categories::Slug)
                .string_len(50)
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(Categories::IsPublished)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(&mut created_at(Categories::CreatedAt))
        .to_owned()
}

fn create_locations() -> TableCreateStatement {
    Table::create()
        .table(Locations::Table)
        .if_not_exists()
        .col(ColumnDef::new(Locations::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Locations::Name).string_len(256).not_null())
        .col(
            ColumnDef::new(Locations::IsPublished)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(&mut created_at(Locations::CreatedAt))
        .to_owned()
}

fn create_posts() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Posts::Title).string_len(256).not_null())
        .col(ColumnDef::new(Posts::Text).text().not_null())
        .col(
            ColumnDef::new(Posts::PubDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
        .col(ColumnDef::new(Posts::LocationId).uuid().null())
        .col(ColumnDef::new(Posts::CategoryId).uuid().null())
        .col(
            ColumnDef::new(Posts::IsPublished)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(&mut created_at(Posts::CreatedAt))
        .col(ColumnDef::new(Posts::Image).string_len(100).null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_author")
                .from(Posts::Table, Posts::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_location")
                .from(Posts::Table, Posts::LocationId)
                .to(Locations::Table, Locations::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_category")
                .from(Posts::Table, Posts::CategoryId)
                .to(Categories::Table, Categories::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn create_comments() -> TableCreateStatement {
    Table::create()
        .table(Comments::Table)
        .if_not_exists()
        .col(ColumnDef::new(Comments::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Comments::Text).string_len(500).not_null())
        .col(ColumnDef::new(Comments::AuthorId).uuid().not_null())
        .col(ColumnDef::new(Comments::PostId).uuid().not_null())
        .col(&mut created_at(Comments::CreatedAt))
        .foreign_key(
            ForeignKey::create()
                .name("fk_comments_author")
                .from(Comments::Table, Comments::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_comments_post")
                .from(Comments::Table, Comments::PostId)
                .to(Posts::Table, Posts::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Title,
    Description,
    Slug,
    IsPublished,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    Name,
    IsPublished,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Text,
    PubDate,
    AuthorId,
    LocationId,
    CategoryId,
    IsPublished,
    CreatedAt,
    Image,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    Text,
    AuthorId,
    PostId,
    CreatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The `CONSTRAINT "<name>" ...` clause of a rendered statement.
    fn constraint<'a>(sql: &'a str, name: &str) -> &'a str {
        let marker = format!("CONSTRAINT \"{name}\"");
        let start = sql.find(&marker).expect("constraint is declared");
        let rest = &sql[start + marker.len()..];
        let end = rest.find("CONSTRAINT").unwrap_or(rest.len());
        &rest[..end]
    }

    #[test]
    fn posts_follow_author_but_survive_location_and_category() {
        let sql = create_posts().to_string(PostgresQueryBuilder);

        assert!(constraint(&sql, "fk_posts_author").contains("ON DELETE CASCADE"));
        assert!(constraint(&sql, "fk_posts_location").contains("ON DELETE SET NULL"));
        assert!(constraint(&sql, "fk_posts_category").contains("ON DELETE SET NULL"));
    }

    #[test]
    fn comments_follow_post_and_author() {
        let sql = create_comments().to_string(PostgresQueryBuilder);

        assert!(constraint(&sql, "fk_comments_post").contains("ON DELETE CASCADE"));
        assert!(constraint(&sql, "fk_comments_author").contains("ON DELETE CASCADE"));
        assert!(sql.contains("varchar(500)"), "{sql}");
    }

    #[test]
    fn category_slug_is_unique() {
        let sql = create_categories().to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""slug" varchar(50) NOT NULL UNIQUE"#), "{sql}");
    }

    #[test]
    fn publish_flags_default_to_true() {
        for sql in [
            create_categories().to_string(PostgresQueryBuilder),
            create_locations().to_string(PostgresQueryBuilder),
            create_posts().to_string(PostgresQueryBuilder),
        ] {
            assert!(sql.contains(r#""is_published" bool NOT NULL DEFAULT"#), "{sql}");
        }
    }
}
