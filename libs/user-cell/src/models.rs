use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shared_database::UserStore;
use shared_utils::identity::IdentityVerifier;

#[derive(Clone)]
pub struct UserState {
    pub users: Arc<dyn UserStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRoleRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStatus {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
