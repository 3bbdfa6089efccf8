use crate::server::model::user::User;

mod booking;
mod notification;
mod resource;

/// Converts a factory-built user into the domain model services take.
fn as_user(model: entity::user::Model) -> User {
    User::from_entity(model)
}
