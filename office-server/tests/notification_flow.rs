//! Notification read/archive lifecycle against the embedded database.
//! Run: cargo test -p office-server --test notification_flow

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

use office_server::db::DbService;
use office_server::db::models::{
    Delivery, DeliveryChannel, Notification, NotificationStatus, NotificationType,
    RecipientContact, RecipientRef, UserCreate, UserId, UserRole, UserStatus,
};
use office_server::db::repository::notification::NotificationWrite;
use office_server::db::repository::{NotificationRepository, UserRepository};

async fn setup() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(tmp.path().to_str().unwrap()).await.unwrap();
    (tmp, service.db)
}

async fn seed_user(db: &Surreal<Db>, email: &str) -> UserId {
    UserRepository::new(db.clone())
        .create(
            UserCreate {
                name: Some("Inbox Owner".to_string()),
                email: Some(email.to_string()),
                password: None,
                role: None,
                phone: None,
                bio: None,
                avatar: None,
                cover_image: None,
            },
            "not-a-real-hash".to_string(),
            UserRole::Admin,
            UserStatus::Active,
        )
        .await
        .unwrap()
        .id
        .unwrap()
}

async fn seed_notification(
    repo: &NotificationRepository,
    recipient: &UserId,
    created_by: &UserId,
    message: &str,
) -> Notification {
    repo.create(
        NotificationWrite {
            notification_type: NotificationType::Info,
            message: message.to_string(),
            recipient: RecipientRef::User {
                id: recipient.to_string(),
            },
            recipient_contact: RecipientContact::default(),
            channels: vec![DeliveryChannel::InApp],
            deliveries: vec![Delivery::pending(DeliveryChannel::InApp)],
            remarks: None,
        },
        created_by.clone(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn bulk_mark_read_is_idempotent() {
    let (_tmp, db) = setup().await;
    let user = seed_user(&db, "inbox1@example.com").await;
    let repo = NotificationRepository::new(db.clone());

    let first = seed_notification(&repo, &user, &user, "First").await;
    let second = seed_notification(&repo, &user, &user, "Second").await;
    let ids = vec![first.id.clone().unwrap(), second.id.clone().unwrap()];

    repo.mark_read(ids.clone()).await.unwrap();
    for id in &ids {
        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, NotificationStatus::Read);
    }

    // marking an already-read set again succeeds and changes nothing
    repo.mark_read(ids.clone()).await.unwrap();
    for id in &ids {
        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, NotificationStatus::Read);
    }
}

#[tokio::test]
async fn mark_read_leaves_archived_rows_alone() {
    let (_tmp, db) = setup().await;
    let user = seed_user(&db, "inbox2@example.com").await;
    let repo = NotificationRepository::new(db.clone());

    let notification = seed_notification(&repo, &user, &user, "Archive me").await;
    let id = notification.id.unwrap();

    repo.archive(vec![id.clone()]).await.unwrap();
    repo.mark_read(vec![id.clone()]).await.unwrap();

    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, NotificationStatus::Archived);
}
