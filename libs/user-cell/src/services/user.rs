use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use shared_database::bson::Document;
use shared_database::{UserProfile, UserStore};
use shared_models::auth::RequestIdentity;
use shared_models::store::{InsertResult, UpdateResult};

/// Result of evaluating the admin-role gate for a requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminGate {
    Unauthenticated,
    NotAdmin,
    /// Carries the verified requester's email.
    Admin(String),
}

pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn register(&self, user: Document) -> Result<InsertResult> {
        debug!("Registering user document");
        self.users.create_user(user).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<UpdateResult> {
        debug!("Saving profile for: {}", profile.email);
        self.users.upsert_user(profile).await
    }

    pub async fn is_admin(&self, email: &str) -> Result<bool> {
        self.users.is_admin(email).await
    }

    /// Decides whether the requester may grant roles. Identity is checked
    /// before the stored role.
    pub async fn check_admin(&self, requester: &RequestIdentity) -> Result<AdminGate> {
        let Some(requester_email) = requester.email() else {
            return Ok(AdminGate::Unauthenticated);
        };

        if !self.users.is_admin(requester_email).await? {
            debug!("{} attempted to grant admin without the role", requester_email);
            return Ok(AdminGate::NotAdmin);
        }

        Ok(AdminGate::Admin(requester_email.to_string()))
    }

    /// Grants the admin role to `target` on behalf of an admin requester.
    ///
    /// The requester check and the grant are separate store calls, so a
    /// role change landing between them is not observed.
    pub async fn grant_admin(&self, requester_email: &str, target: &str) -> Result<UpdateResult> {
        let result = self.users.set_admin_role(target).await?;
        info!("{} granted admin role to {}", requester_email, target);
        Ok(result)
    }
}
