use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Random public identifier used in URLs instead of the numeric id.
    #[sea_orm(unique)]
    pub uid: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub owner_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Data for creating a new page row
pub struct NewPageEntity {
    pub uid: String,
    pub title: String,
    pub content: String,
    pub owner_id: Option<i64>,
}

/// Data for updating an existing page row
pub struct UpdatePageEntity {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Find a page by its public identifier
pub async fn find_by_uid(db: &DatabaseConnection, uid: &str) -> Result<Option<Model>, DbErr> {
    Entity::find().filter(Column::Uid.eq(uid)).one(db).await
}

/// List pages, optionally filtered by owner, in insertion order
pub async fn list(db: &DatabaseConnection, owner_id: Option<i64>) -> Result<Vec<Model>, DbErr> {
    let mut query = Entity::find().order_by_asc(Column::Id);
    if let Some(owner) = owner_id {
        query = query.filter(Column::OwnerId.eq(owner));
    }
    query.all(db).await
}

/// Create a new page
pub async fn create(db: &DatabaseConnection, new_page: NewPageEntity) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        uid: Set(new_page.uid),
        title: Set(new_page.title),
        content: Set(new_page.content),
        owner_id: Set(new_page.owner_id),
        ..Default::default()
    };

    active_model.insert(db).await
}

/// Update an existing page
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    update_data: UpdatePageEntity,
) -> Result<Model, DbErr> {
    let mut active_model = ActiveModel {
        id: Set(id),
        ..Default::default()
    };

    if let Some(title) = update_data.title {
        active_model.title = Set(title);
    }
    if let Some(content) = update_data.content {
        active_model.content = Set(content);
    }

    active_model.update(db).await
}

/// Delete a page by numeric id, returns true if a page was deleted
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
