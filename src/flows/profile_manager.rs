use tracing::{error, info, instrument, warn};
use crate::clients::{AuthClient, ProfileClient};
use crate::domain::{Profile, ProfilePatch, SessionState};
use crate::profile_actor::ProfileError;
use super::notice::Notice;

const UPDATE_SUCCEEDED: &str =
    "Profile updated successfully. Please check your email to confirm the email change.";
const UPDATE_FAILED: &str = "Failed to update profile";

/// Values submitted from the profile form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

/// A completed update: the profile as re-read after the write.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdated {
    pub profile: Profile,
    pub notice: Notice,
}

impl ProfileError {
    /// The message shown to the user for this failure.
    pub fn notice(&self) -> Notice {
        let description = match self {
            ProfileError::ValidationError(reason) | ProfileError::IdentityProviderError(reason) => reason.clone(),
            _ => UPDATE_FAILED.to_string(),
        };
        Notice::error(description)
    }
}

/// Reads and updates the signed-in user's profile.
#[derive(Clone)]
pub struct ProfileManager {
    auth: AuthClient,
    profiles: ProfileClient,
}

impl ProfileManager {
    pub fn new(auth: AuthClient, profiles: ProfileClient) -> Self {
        Self { auth, profiles }
    }

    /// Profile linked to the session, or `None` when there is no session, no
    /// profile, or the lookup failed.
    #[instrument(skip(self, session))]
    pub async fn get_profile(&self, session: &SessionState) -> Option<Profile> {
        let session = session.session()?;
        match self.profiles.get_profile(session.user_id.clone()).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id = %session.user_id, error = %e, "Profile lookup failed");
                None
            }
        }
    }

    /// Applies a name/email change to the signed-in user's own profile.
    ///
    /// The identity provider only ever changes the session user's email, so
    /// any other `profile_id` is refused before a call is made. An email change is first requested from the identity provider; the
    /// profile record is only written once that request succeeded. The
    /// returned profile is re-read from the table after the write.
    #[instrument(skip(self, session, update))]
    pub async fn update_profile(
        &self,
        session: &SessionState,
        profile_id: &str,
        update: ProfileUpdate,
    ) -> Result<ProfileUpdated, ProfileError> {
        let owned = session.session().is_some_and(|session| session.user_id == profile_id);
        if !owned {
            warn!("Profile update outside the current session");
            return Err(ProfileError::Unauthorized(profile_id.to_string()));
        }

        let result = self.apply_update(profile_id, update).await;
        if let Err(e) = &result {
            error!(error = %e, "Profile update failed");
        }
        result
    }

    async fn apply_update(&self, profile_id: &str, update: ProfileUpdate) -> Result<ProfileUpdated, ProfileError> {
        let name = update.name.trim().to_string();
        let email = update.email.trim().to_string();
        if name.is_empty() {
            return Err(ProfileError::ValidationError("Name is required".to_string()));
        }
        if email.is_empty() {
            return Err(ProfileError::ValidationError("Email is required".to_string()));
        }
        if !email.contains('@') {
            return Err(ProfileError::ValidationError("Please enter a valid email address".to_string()));
        }

        let current = self
            .profiles
            .get_profile(profile_id.to_string())
            .await?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;

        if current.email != email {
            self.auth
                .update_user(email.clone())
                .await
                .map_err(|e| ProfileError::IdentityProviderError(e.to_string()))?;
            info!("Email change requested");
        }

        let patch = ProfilePatch { name: Some(name), email: Some(email) };
        self.profiles.update_profile(profile_id.to_string(), patch).await?;

        let profile = self
            .profiles
            .get_profile(profile_id.to_string())
            .await?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()))?;

        info!("Profile updated");
        Ok(ProfileUpdated { profile, notice: Notice::success(UPDATE_SUCCEEDED) })
    }
}
