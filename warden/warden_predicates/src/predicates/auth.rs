//! Predicates over the acting identity.

#![deny(missing_docs)]

use warden_core::model::PredicateResult;

use super::{acting_client, acting_user};
use crate::model::{Context, Identity};

/// Someone, user or client, is acting.
pub fn authenticated(identity: &Identity, _context: &Context) -> PredicateResult {
    Ok(identity.is_authenticated())
}

/// A user is acting.
pub fn authenticated_user(identity: &Identity, _context: &Context) -> PredicateResult {
    Ok(identity.user.is_some())
}

/// The acting user is a staff member.
pub fn user_is_staff(identity: &Identity, _context: &Context) -> PredicateResult {
    Ok(acting_user(identity)?.staff)
}

/// The acting user is an administrator.
pub fn user_is_admin(identity: &Identity, _context: &Context) -> PredicateResult {
    Ok(acting_user(identity)?.admin)
}

/// An API client is acting.
pub fn authenticated_client(identity: &Identity, _context: &Context) -> PredicateResult {
    Ok(identity.auth_client.is_some())
}

/// The acting client belongs to an LMS authority (`lms.*.hypothes.is`).
pub fn authenticated_client_is_lms(identity: &Identity, _context: &Context) -> PredicateResult {
    let authority = &acting_client(identity)?.authority;
    Ok(authority.starts_with("lms.") && authority.ends_with(".hypothes.is"))
}
