//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults so tests only spell out the fields
//! they care about. Each entity has a `*Factory` builder for customization and a
//! `create_*` shorthand for the default case.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(db).await?;
//! let (owner, resource) = factory::helpers::create_resource_with_owner(db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let staff = factory::user::UserFactory::new(db)
//!     .role("staff")
//!     .name("Dr. Lee")
//!     .build()
//!     .await?;
//!
//! let booking = factory::booking::BookingFactory::new(db, resource.id, staff.id)
//!     .status("pending")
//!     .window(start, end)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users with a role
//! - `resource` - Bookable resources
//! - `booking` - Reservations of a resource
//! - `review` - Ratings left on resources
//! - `message` - Messages within a thread
//! - `notification` - Per-user alerts
//! - `helpers` - ID generation and multi-entity setups

pub mod booking;
pub mod helpers;
pub mod message;
pub mod notification;
pub mod resource;
pub mod review;
pub mod user;

pub use booking::create_booking;
pub use message::create_message;
pub use notification::create_notification;
pub use resource::create_resource;
pub use review::create_review;
pub use user::create_user;
