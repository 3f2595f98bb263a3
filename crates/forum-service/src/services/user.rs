//! User accounts
//!
//! Registration and profile edits. Points and staff rights are never set
//! from here: points move only through the reputation ledger and staff
//! rights are granted outside the API.

use chrono::Utc;
use forum_core::{DomainError, Snowflake, User};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{RegisterUserRequest, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user with zero points and no staff rights
    ///
    /// Usernames are unique; a taken one is a validation error.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterUserRequest) -> ServiceResult<UserResponse> {
        request.validate()?;

        let mut user = User::new(self.ctx.generate_id(), request.username, request.email);
        user.profile = request.profile;
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        Ok(self.find(user_id).await?.into())
    }

    /// Replace a profile; only its owner may do so
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        requestor: Snowflake,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;

        let mut user = self.find(user_id).await?;
        if requestor != user.id {
            return Err(ServiceError::forbidden("only the owner may edit this profile"));
        }

        user.profile = request.profile;
        user.updated_at = Utc::now();
        self.ctx.user_repo().update_profile(&user).await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(user.into())
    }

    async fn find(&self, user_id: Snowflake) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Harness;
    use crate::services::ReputationLedger;

    fn register_req(username: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            username: username.into(),
            email: format!("{username}@example.com"),
            profile: Some("hello".into()),
        }
    }

    #[tokio::test]
    async fn test_register_starts_at_zero_points() {
        let h = Harness::new();
        let service = UserService::new(&h.ctx);

        let user = service.register(register_req("alice")).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.profile.as_deref(), Some("hello"));
        assert_eq!(user.points, 0);
        assert!(!user.is_staff);

        // registered users take part in the ledger like any other
        ReputationLedger::new(&h.ctx).adjust(user.id, 1).await.unwrap();
        assert_eq!(service.get_user(user.id).await.unwrap().points, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username_and_bad_email() {
        let h = Harness::new();
        let service = UserService::new(&h.ctx);
        service.register(register_req("alice")).await.unwrap();

        let err = service.register(register_req("alice")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = service
            .register(RegisterUserRequest {
                email: "nope".into(),
                ..register_req("bob")
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_profile_is_owner_only() {
        let h = Harness::new();
        let alice = h.user("alice").await;
        let bob = h.user("bob").await;
        let service = UserService::new(&h.ctx);

        let err = service
            .update_profile(
                bob.id,
                alice.id,
                UpdateProfileRequest {
                    profile: Some("hijacked".into()),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert!(service.get_user(alice.id).await.unwrap().profile.is_none());

        let updated = service
            .update_profile(
                alice.id,
                alice.id,
                UpdateProfileRequest {
                    profile: Some("about me".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.profile.as_deref(), Some("about me"));
        assert_eq!(
            service.get_user(alice.id).await.unwrap().profile.as_deref(),
            Some("about me")
        );
    }

    #[tokio::test]
    async fn test_profile_edit_keeps_points() {
        let h = Harness::new();
        let alice = h.user("alice").await;
        ReputationLedger::new(&h.ctx).adjust(alice.id, 3).await.unwrap();

        UserService::new(&h.ctx)
            .update_profile(alice.id, alice.id, UpdateProfileRequest { profile: None })
            .await
            .unwrap();
        assert_eq!(h.points(alice.id).await, 3);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let h = Harness::new();
        let err = UserService::new(&h.ctx)
            .get_user(Snowflake::new(404))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
