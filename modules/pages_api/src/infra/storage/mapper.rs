use crate::contract::model::{Page, User};
use crate::infra::storage::entity::{page::Model as PageEntity, user::Model as UserEntity};

/// Convert a user row to a contract model. The password hash stays behind;
/// credential checks read the row directly.
pub fn user_to_contract(entity: UserEntity) -> User {
    User {
        id: entity.id,
        email: entity.email,
        name: entity.name,
    }
}

/// Convert a page row to a contract model
pub fn page_to_contract(entity: PageEntity) -> Page {
    Page {
        id: entity.id,
        uid: entity.uid,
        title: entity.title,
        content: entity.content,
        owner_id: entity.owner_id,
    }
}
