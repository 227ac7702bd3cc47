use crate::actor_framework::Entity;
use crate::domain::{Profile, ProfileCreate, ProfilePatch};

impl Entity for Profile {
    type Id = String;
    type CreateParams = ProfileCreate;
    type Patch = ProfilePatch;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Profile from signup parameters.
    ///
    /// # Arguments
    /// * `id` - Identity user id the profile is linked to
    /// * `params` - Name, email and role captured at signup
    fn from_create_params(id: String, params: ProfileCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            role: params.role,
        })
    }

    /// Updates the profile's name and/or email.
    ///
    /// # Fields Updated
    /// - `name`: display name
    /// - `email`: contact email, must not be blank
    ///
    /// The role is never touched here.
    fn on_update(&mut self, patch: ProfilePatch) -> Result<(), String> {
        if let Some(email) = &patch.email {
            if email.trim().is_empty() {
                return Err("Email cannot be empty".to_string());
            }
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn profile() -> Profile {
        Profile::from_create_params(
            "user_1".to_string(),
            ProfileCreate { name: "Ada".into(), email: "ada@example.com".into(), role: Role::Client },
        )
        .unwrap()
    }

    #[test]
    fn test_patch_updates_only_given_fields() {
        let mut profile = profile();
        profile.on_update(ProfilePatch { name: Some("Ada L.".into()), email: None }).unwrap();
        assert_eq!(profile.name, "Ada L.");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.role, Role::Client);
    }

    #[test]
    fn test_blank_email_rejected_without_partial_update() {
        let mut profile = profile();
        let result = profile.on_update(ProfilePatch { name: Some("Other".into()), email: Some("  ".into()) });
        assert!(result.is_err());
        assert_eq!(profile.name, "Ada");
    }
}
