use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{NewPage, NewUser, Page, PagePatch, User};
use crate::domain::auth::password::{hash_password, verify_password};
use crate::domain::auth::token::TokenService;
use crate::domain::error::DomainError;
use crate::infra::storage::entity::{page, user};
use crate::infra::storage::mapper::{page_to_contract, user_to_contract};

/// Domain service with the business rules for registration, login, and
/// owner-scoped page CRUD. Holds the connection pool and the token service;
/// each operation borrows a pooled connection for its own duration.
pub struct Service {
    db: DatabaseConnection,
    tokens: TokenService,
}

impl Service {
    pub fn new(db: DatabaseConnection, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    // ---- Users / auth ----

    #[instrument(name = "pages_api.service.register", skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Registering new user");

        if user::email_exists(&self.db, &new_user.email).await? {
            return Err(DomainError::email_already_registered(new_user.email));
        }

        let password_hash = hash_password(&new_user.password)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let row = user::create(
            &self.db,
            user::NewUserEntity {
                email: new_user.email,
                name: new_user.name,
                password_hash,
            },
        )
        .await?;

        info!("Registered user with id={}", row.id);
        Ok(user_to_contract(row))
    }

    /// Verify credentials and issue an access token.
    ///
    /// A missing user and a wrong password are indistinguishable to the
    /// caller; both come back as invalid credentials.
    #[instrument(name = "pages_api.service.login", skip_all, fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        debug!("Authenticating user");

        let row = user::find_by_email(&self.db, email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !verify_password(password, &row.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        self.tokens
            .issue(row.id)
            .map_err(|e| DomainError::internal(e.to_string()))
    }

    /// Resolve a bearer token to its user. Rejects bad signatures, expired
    /// tokens, and subjects whose user row no longer exists.
    #[instrument(name = "pages_api.service.authenticate", skip_all)]
    pub async fn authenticate_token(&self, token: &str) -> Result<User, DomainError> {
        let subject = self
            .tokens
            .verify(token)
            .map_err(|_| DomainError::InvalidToken)?;

        let row = user::find_by_id(&self.db, subject)
            .await?
            .ok_or(DomainError::user_not_found(subject))?;

        Ok(user_to_contract(row))
    }

    // ---- Pages ----

    #[instrument(name = "pages_api.service.create_page", skip(self, new_page), fields(caller = caller.id))]
    pub async fn create_page(&self, caller: &User, new_page: NewPage) -> Result<Page, DomainError> {
        info!("Creating page");

        let owner_id = new_page.owner_id.or(Some(caller.id));
        let row = page::create(
            &self.db,
            page::NewPageEntity {
                uid: Uuid::new_v4().to_string(),
                title: new_page.title,
                content: new_page.content,
                owner_id,
            },
        )
        .await?;

        info!("Created page uid={}", row.uid);
        Ok(page_to_contract(row))
    }

    #[instrument(name = "pages_api.service.get_page", skip(self, caller), fields(caller = caller.id, uid = %uid))]
    pub async fn get_page(&self, caller: &User, uid: &str) -> Result<Page, DomainError> {
        debug!("Fetching page");

        let row = page::find_by_uid(&self.db, uid)
            .await?
            .ok_or_else(|| DomainError::page_not_found(uid))?;

        check_owner(&row, caller)?;
        Ok(page_to_contract(row))
    }

    /// List pages for an owner; defaults to the caller's own pages when no
    /// filter is given.
    #[instrument(name = "pages_api.service.list_pages", skip(self, caller), fields(caller = caller.id))]
    pub async fn list_pages(
        &self,
        caller: &User,
        owner_id: Option<i64>,
    ) -> Result<Vec<Page>, DomainError> {
        debug!("Listing pages");

        let owner = owner_id.unwrap_or(caller.id);
        let rows = page::list(&self.db, Some(owner)).await?;
        Ok(rows.into_iter().map(page_to_contract).collect())
    }

    #[instrument(name = "pages_api.service.update_page", skip(self, caller, patch), fields(caller = caller.id, uid = %uid))]
    pub async fn update_page(
        &self,
        caller: &User,
        uid: &str,
        patch: PagePatch,
    ) -> Result<Page, DomainError> {
        info!("Updating page");

        let row = page::find_by_uid(&self.db, uid)
            .await?
            .ok_or_else(|| DomainError::page_not_found(uid))?;

        check_owner(&row, caller)?;

        let updated = page::update(
            &self.db,
            row.id,
            page::UpdatePageEntity {
                title: patch.title,
                content: patch.content,
            },
        )
        .await?;

        Ok(page_to_contract(updated))
    }

    #[instrument(name = "pages_api.service.delete_page", skip(self, caller), fields(caller = caller.id, uid = %uid))]
    pub async fn delete_page(&self, caller: &User, uid: &str) -> Result<(), DomainError> {
        info!("Deleting page");

        let row = page::find_by_uid(&self.db, uid)
            .await?
            .ok_or_else(|| DomainError::page_not_found(uid))?;

        check_owner(&row, caller)?;

        page::delete(&self.db, row.id).await?;
        Ok(())
    }
}

/// Owned pages are accessible only to their owner; unowned pages are open to
/// any authenticated user. Non-owners get forbidden, not not-found — the
/// resource's existence is deliberately not hidden.
fn check_owner(row: &page::Model, caller: &User) -> Result<(), DomainError> {
    match row.owner_id {
        Some(owner) if owner != caller.id => Err(DomainError::not_owner(row.uid.clone())),
        _ => Ok(()),
    }
}
