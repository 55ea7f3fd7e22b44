/// Pure user model (no serde); the password hash never leaves the domain layer
/// through this type's REST mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// Data for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

/// A content page. `uid` is the random public identifier used in URLs;
/// the numeric `id` stays internal to avoid exposing sequential ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: i64,
    pub uid: String,
    pub title: String,
    pub content: String,
    pub owner_id: Option<i64>,
}

/// Data for creating a new page. Owner defaults to the caller when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub title: String,
    pub content: String,
    pub owner_id: Option<i64>,
}

/// Partial update data for a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}
