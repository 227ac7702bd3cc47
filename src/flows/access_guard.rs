use tracing::{debug, info, instrument, warn};
use crate::clients::{AuthClient, ProfileClient};
use crate::domain::{Profile, Role, Session, SessionState};
use super::notice::Route;

/// What a view needs before it may render.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    Authenticated,
    Role(Role),
}

/// Identity resolved by a successful check. `profile` is only fetched for
/// role requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardContext {
    pub session: Session,
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Granted(GuardContext),
    Redirect(Route),
}

/// Precondition check run on entry to every protected view.
///
/// Never fails: an unreachable identity provider or profiles table counts as
/// unauthenticated or unauthorized and yields a redirect.
#[derive(Clone)]
pub struct AccessGuard {
    auth: AuthClient,
    profiles: ProfileClient,
}

impl AccessGuard {
    pub fn new(auth: AuthClient, profiles: ProfileClient) -> Self {
        Self { auth, profiles }
    }

    #[instrument(skip(self))]
    pub async fn check(&self, requirement: &Requirement) -> GuardDecision {
        let session = match self.auth.get_session().await {
            Ok(SessionState::Authenticated(session)) => session,
            Ok(SessionState::Unauthenticated) => {
                debug!("No session, redirecting");
                return GuardDecision::Redirect(Route::Landing);
            }
            Err(e) => {
                warn!(error = %e, "Session lookup failed, redirecting");
                return GuardDecision::Redirect(Route::Landing);
            }
        };

        let required_role = match requirement {
            Requirement::Authenticated => {
                return GuardDecision::Granted(GuardContext { session, profile: None });
            }
            Requirement::Role(role) => role,
        };

        let profile = match self.profiles.get_profile(session.user_id.clone()).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(user_id = %session.user_id, "Session has no profile, redirecting");
                return GuardDecision::Redirect(Route::Landing);
            }
            Err(e) => {
                warn!(user_id = %session.user_id, error = %e, "Profile lookup failed, redirecting");
                return GuardDecision::Redirect(Route::Landing);
            }
        };

        if &profile.role != required_role {
            info!(user_id = %session.user_id, role = %profile.role, "Role not permitted, redirecting");
            return GuardDecision::Redirect(Route::Landing);
        }

        GuardDecision::Granted(GuardContext { session, profile: Some(profile) })
    }
}
