use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::Notification;
use crate::domain::types::{Collection, NotificationKind};
use crate::engine::{Engine, EngineError};
use crate::store::Snapshot;

impl Engine {
    pub(super) async fn push_notification(
        &self,
        snapshot: &mut Snapshot,
        user_id: &str,
        kind: NotificationKind,
        message: String,
    ) -> Result<Notification, EngineError> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            kind,
            message,
            is_read: false,
            created_at: OffsetDateTime::now_utc(),
        };
        self.persist(Collection::Notifications, &notification.id, &notification).await?;
        snapshot.notifications.push(notification.clone());
        Ok(notification)
    }

    /// Recipients can only touch their own notifications; anything else
    /// reads as absent.
    pub(crate) async fn mark_notification_read(
        &self,
        user_id: &str,
        notification_id: &str,
    ) -> Result<Notification, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .notifications
            .iter()
            .position(|row| row.id == notification_id && row.user_id == user_id)
            .ok_or_else(|| EngineError::not_found("notification", notification_id))?;

        let mut notification = snapshot.notifications[index].clone();
        notification.is_read = true;

        self.persist(Collection::Notifications, notification_id, &notification).await?;
        snapshot.notifications[index] = notification.clone();
        Ok(notification)
    }
}
