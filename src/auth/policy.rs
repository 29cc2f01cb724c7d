//! Access Policy
//! Mission: Decide who may touch what

use crate::auth::models::Role;
use crate::auth::user_store::UserStore;
use anyhow::Result;
use uuid::Uuid;

/// True iff the identity's stored role is admin; an identity that no longer
/// exists is simply not an admin.
pub fn is_admin(user_store: &UserStore, user_id: &Uuid) -> Result<bool> {
    Ok(user_store
        .find_by_id(user_id)?
        .map(|u| u.role == Role::Admin)
        .unwrap_or(false))
}

/// Ownership check: the resource owner or any admin may act
pub fn owns_or_admin(role: &Role, caller_id: &Uuid, target_id: &Uuid) -> bool {
    *role == Role::Admin || caller_id == target_id
}
