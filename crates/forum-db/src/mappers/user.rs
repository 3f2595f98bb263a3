//! User entity <-> model mapper

use forum_core::entities::User;
use forum_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            profile: model.profile,
            points: model.points,
            is_staff: model.is_staff,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
