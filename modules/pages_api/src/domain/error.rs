use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Email '{email}' already registered")]
    EmailAlreadyRegistered { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found: {id}")]
    UserNotFound { id: i64 },

    #[error("Page not found: {uid}")]
    PageNotFound { uid: String },

    #[error("Page {uid} belongs to another user")]
    NotOwner { uid: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn email_already_registered(email: impl Into<String>) -> Self {
        Self::EmailAlreadyRegistered {
            email: email.into(),
        }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn page_not_found(uid: impl Into<String>) -> Self {
        Self::PageNotFound { uid: uid.into() }
    }

    pub fn not_owner(uid: impl Into<String>) -> Self {
        Self::NotOwner { uid: uid.into() }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}
