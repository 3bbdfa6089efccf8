use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Resource};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Resource)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// CREATE INDEX statements executed after every table exists.
    indexes: Vec<IndexCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and resource tables along with resource images and equipment.
    pub fn with_resource_tables(self) -> Self {
        self.with_table(User)
            .with_table(Resource)
            .with_table(ResourceImage)
            .with_table(ResourceEquipment)
    }

    /// Adds every table touched by booking operations.
    ///
    /// Booking state transitions write notifications, so the notification table is
    /// included alongside users, resources and bookings.
    pub fn with_booking_tables(self) -> Self {
        self.with_resource_tables()
            .with_table(Booking)
            .with_table(Notification)
    }

    /// Adds the booking tables plus reviews with their `(resource_id, user_id)` unique index.
    pub fn with_review_tables(mut self) -> Self {
        self.indexes.push(
            Index::create()
                .name("idx_review_resource_user")
                .table(Review)
                .col(entity::review::Column::ResourceId)
                .col(entity::review::Column::UserId)
                .unique()
                .to_owned(),
        );
        self.with_booking_tables().with_table(Review)
    }

    /// Adds the user, message and notification tables.
    pub fn with_message_tables(self) -> Self {
        self.with_table(User)
            .with_table(Message)
            .with_table(Notification)
    }

    /// Adds the full schema.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_all_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_all_tables(self) -> Self {
        self.with_review_tables().with_table(Message)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection, executes all CREATE TABLE
    /// statements in the order they were added, then creates configured indexes.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::Database)` - Failed to connect or create schema
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
