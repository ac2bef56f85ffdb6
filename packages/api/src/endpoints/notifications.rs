use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Contact, ContactList, NewNotification, Notification};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get("/notifications", Vec::new()).await
    }

    pub async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, ApiError> {
        self.post("/notifications", notification).await
    }

    /// Parent contacts reached by a notification, with WhatsApp links.
    pub async fn notification_contacts(&self, id: &str) -> Result<Vec<Contact>, ApiError> {
        let list: ContactList = self
            .get(&format!("/notifications/{id}/contacts"), Vec::new())
            .await?;
        Ok(list.contacts)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    use crate::testing::ScriptedTransport;
    use crate::transport::Method;
    use crate::{ApiClient, SessionStore};

    #[tokio::test]
    async fn test_contacts_are_unwrapped() {
        let transport = ScriptedTransport::new();
        transport.on(
            Method::Get,
            "/notifications/n1/contacts",
            200,
            json!({ "contacts": [{
                "student_name": "Aarav",
                "parent_contact": "9876543210",
                "whatsapp_link": "https://wa.me/9876543210?text=Hello"
            }]}),
        );
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        let api = ApiClient::new(transport, SessionStore::new(storage));

        let contacts = api.notification_contacts("n1").await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].whatsapp_link.starts_with("https://wa.me/"));
    }
}
