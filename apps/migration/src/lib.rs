//! Schema migrations for the Quill store.
//!
//! Uniqueness of `users.email` and `posts.title` and the comment cascade
//! live here, at the store level, so they hold under concurrent writers.

pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users;
mod m20250801_000002_create_posts;
mod m20250801_000003_create_comments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_users::Migration),
            Box::new(m20250801_000002_create_posts::Migration),
            Box::new(m20250801_000003_create_comments::Migration),
        ]
    }
}
