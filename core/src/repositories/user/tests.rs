use chrono::Utc;

use super::*;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

fn user_with_subject(email: &str, subject: &str) -> User {
    let mut user = User::new(email, "Someone", Utc::now());
    user.external_subject_id = Some(subject.to_string());
    user
}

#[tokio::test]
async fn test_lookup_by_subject_and_email() {
    let repo = MockUserRepository::new();
    let user = user_with_subject("Alice@X.com", "google-1");
    repo.create(&user).await.unwrap();

    let by_subject = repo.find_by_external_subject("google-1").await.unwrap();
    assert_eq!(by_subject.map(|u| u.id), Some(user.id));

    let by_email = repo.find_by_email("alice@x.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_create_enforces_uniqueness_among_live_users() {
    let repo = MockUserRepository::new();
    repo.create(&user_with_subject("a@x.com", "g-1")).await.unwrap();

    let same_email = repo.create(&user_with_subject("a@x.com", "g-2")).await;
    assert!(matches!(same_email, Err(DomainError::Persistence { .. })));

    let same_subject = repo.create(&user_with_subject("b@x.com", "g-1")).await;
    assert!(matches!(same_subject, Err(DomainError::Persistence { .. })));
}

#[tokio::test]
async fn test_soft_deleted_users_are_invisible() {
    let repo = MockUserRepository::new();
    let mut user = user_with_subject("a@x.com", "g-1");
    user.deleted_at = Some(Utc::now());
    repo.create(&user).await.unwrap();

    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    assert!(repo.find_by_external_subject("g-1").await.unwrap().is_none());

    // a fresh account may reuse the identity
    repo.create(&user_with_subject("a@x.com", "g-1")).await.unwrap();
    assert_eq!(repo.count().await, 2);
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let repo = MockUserRepository::new();
    let user = user_with_subject("a@x.com", "g-1");
    let result = repo.update(&user).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
