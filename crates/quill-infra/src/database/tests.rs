#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::sql_repo::{SqlPostRepository, SqlUserRepository, mask_email};
    use quill_core::domain::{Post, Role, User};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let now = chrono::Utc::now();

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![post::Model {
                id: 7,
                title: "Test Post".to_owned(),
                subtitle: "Sub".to_owned(),
                body: "<p>Content</p>".to_owned(),
                image_url: "https://example.com/img.png".to_owned(),
                date: "August 06, 2026".to_owned(),
                author_id: 1,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = SqlPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 7);
    }

    #[tokio::test]
    async fn test_find_user_by_email_maps_role() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![user::Model {
                id: 1,
                name: "Boss".to_owned(),
                email: "boss@example.com".to_owned(),
                password_hash: "$argon2id$...".to_owned(),
                role: "admin".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = SqlUserRepository::new(db);

        let result: Option<User> = repo.find_by_email("boss@example.com").await.unwrap();

        let found = result.unwrap();
        assert_eq!(found.role, Role::Admin);
        assert_eq!(found.email, "boss@example.com");
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = SqlPostRepository::new(db);

        let result: Result<(), _> = BaseRepository::<Post, i32>::delete(&repo, 41).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[test]
    fn test_mask_email_hides_the_local_part() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
