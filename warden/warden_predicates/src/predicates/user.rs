//! Predicates over a user being acted on.

#![deny(missing_docs)]

use warden_core::model::PredicateResult;

use super::{acting_client, target_user};
use crate::model::{Context, Identity};

/// The context names a user.
pub fn user_found(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(context.user.is_some())
}

/// The acting client and the target user share an authority.
pub fn user_authority_matches_authenticated_client(
    identity: &Identity,
    context: &Context,
) -> PredicateResult {
    Ok(target_user(context)?.authority == acting_client(identity)?.authority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthClient, User};

    #[test]
    fn test_user_found() {
        let identity = Identity::anonymous();
        assert_eq!(user_found(&identity, &Context::empty()), Ok(false));
        assert_eq!(
            user_found(&identity, &Context::for_user(User::new("eve", "example.com"))),
            Ok(true)
        );
    }

    #[test]
    fn test_authority_match() {
        let context = Context::for_user(User::new("eve", "example.com"));

        let same = Identity::for_client(AuthClient::new("example.com"));
        let other = Identity::for_client(AuthClient::new("elsewhere.org"));

        assert_eq!(
            user_authority_matches_authenticated_client(&same, &context),
            Ok(true)
        );
        assert_eq!(
            user_authority_matches_authenticated_client(&other, &context),
            Ok(false)
        );
        assert!(user_authority_matches_authenticated_client(&same, &Context::empty()).is_err());
    }
}
