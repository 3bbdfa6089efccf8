pub use super::booking::Entity as Booking;
pub use super::message::Entity as Message;
pub use super::notification::Entity as Notification;
pub use super::resource::Entity as Resource;
pub use super::resource_equipment::Entity as ResourceEquipment;
pub use super::resource_image::Entity as ResourceImage;
pub use super::review::Entity as Review;
pub use super::user::Entity as User;
