use serde::{Deserialize, Serialize};

use crate::contract::model::{NewPage, NewUser, Page, PagePatch, User};

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// REST DTO for registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterReq {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

/// Form body for the token endpoint (OAuth2 password-style: the login name
/// travels in `username` even though it is an email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// REST DTO for an issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
}

impl TokenDto {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// REST DTO for page representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDto {
    pub id: i64,
    pub uid: String,
    pub title: String,
    pub content: String,
    pub owner_id: Option<i64>,
}

/// REST DTO for creating a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePageReq {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
}

/// REST DTO for partial page updates
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatePageReq {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Query parameters for listing pages
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListPagesQuery {
    pub owner_id: Option<i64>,
}

/// REST DTO for delete confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedDto {
    pub ok: bool,
    pub message: String,
}

/// REST DTO for the liveness check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDto {
    pub status: String,
    pub msg: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

impl From<RegisterReq> for NewUser {
    fn from(req: RegisterReq) -> Self {
        Self {
            email: req.email,
            name: req.name,
            password: req.password,
        }
    }
}

impl From<Page> for PageDto {
    fn from(page: Page) -> Self {
        Self {
            id: page.id,
            uid: page.uid,
            title: page.title,
            content: page.content,
            owner_id: page.owner_id,
        }
    }
}

impl From<CreatePageReq> for NewPage {
    fn from(req: CreatePageReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
            owner_id: req.owner_id,
        }
    }
}

impl From<UpdatePageReq> for PagePatch {
    fn from(req: UpdatePageReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}
