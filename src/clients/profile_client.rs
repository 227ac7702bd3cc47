use tracing::{debug, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Profile, ProfileCreate, ProfilePatch};
use crate::profile_actor::ProfileError;

/// Client for the profiles table.
#[derive(Clone)]
pub struct ProfileClient {
    inner: ResourceClient<Profile>,
}

impl_basic_client!(ProfileClient, Profile, ProfileError, profile);

impl ProfileClient {
    #[instrument(skip(self))]
    pub async fn create_profile(&self, params: ProfileCreate) -> Result<String, ProfileError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(|e| ProfileError::DatabaseError(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, id: String, patch: ProfilePatch) -> Result<Profile, ProfileError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(|e| match e {
            FrameworkError::NotFound(id) => ProfileError::NotFound(id),
            FrameworkError::Rejected(reason) => ProfileError::ValidationError(reason),
            other => ProfileError::ActorCommunicationError(other.to_string()),
        })
    }
}
