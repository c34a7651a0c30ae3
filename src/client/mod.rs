//! Typed client for the contacts API. One function per resource
//! operation; every outcome is normalized into [`Outcome`] instead of a
//! transport-specific error, so callers branch on `success` only.

use serde::de::DeserializeOwned;

use crate::contacts::{Contact, ContactPatch, NewContact};

/// Uniform result shape: `success: false` covers network failure, non-2xx
/// status, and body-parse failure alike.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Outcome<T> {
    fn ok(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

pub struct ContactsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ContactsClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_contacts(&self) -> Outcome<Vec<Contact>> {
        let request = self
            .http
            .get(self.url("/api/contacts"))
            .bearer_auth(&self.token);
        send_json(request, "Contacts fetched").await
    }

    pub async fn get_contact(&self, id: i64) -> Outcome<Contact> {
        let request = self
            .http
            .get(self.url(&format!("/api/contacts/{id}")))
            .bearer_auth(&self.token);
        send_json(request, "Contact fetched").await
    }

    pub async fn create_contact(&self, new: &NewContact) -> Outcome<Contact> {
        let request = self
            .http
            .post(self.url("/api/contacts"))
            .bearer_auth(&self.token)
            .json(new);
        send_json(request, "Contact created").await
    }

    /// The API's replace operation wants a complete object, so update
    /// re-fetches the current record, shallow-merges the partial changes
    /// over it, and PUTs the merged record back.
    pub async fn update_contact(&self, id: i64, changes: &ContactPatch) -> Outcome<Contact> {
        let current = self.get_contact(id).await;
        let Some(mut record) = current.data else {
            return Outcome::err(current.message);
        };
        changes.apply_to(&mut record);

        let request = self
            .http
            .put(self.url(&format!("/api/contacts/{id}")))
            .bearer_auth(&self.token)
            .json(&record);
        send_json(request, "Contact updated").await
    }

    pub async fn delete_contact(&self, id: i64) -> Outcome<()> {
        let request = self
            .http
            .delete(self.url(&format!("/api/contacts/{id}")))
            .bearer_auth(&self.token);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Outcome::err(format!("Network error: {e}")),
        };
        let status = response.status();
        if status.is_success() {
            Outcome::ok("Contact deleted", Some(()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Outcome::err(error_message(status, &body))
        }
    }

    pub async fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Outcome<String> {
        let part = match reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
        {
            Ok(part) => part,
            Err(e) => return Outcome::err(format!("Invalid content type: {e}")),
        };
        let form = reqwest::multipart::Form::new().part("image", part);

        let request = self
            .http
            .post(self.url("/api/image"))
            .bearer_auth(&self.token)
            .multipart(form);
        send_json(request, "Image uploaded").await
    }

    pub async fn validate_token(&self) -> Outcome<()> {
        let request = self
            .http
            .get(self.url("/api/auth/validate-token"))
            .bearer_auth(&self.token);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Outcome::err(format!("Network error: {e}")),
        };
        let status = response.status();
        if status.is_success() {
            Outcome::ok("Token is valid", Some(()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Outcome::err(error_message(status, &body))
        }
    }
}

async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    success_message: &str,
) -> Outcome<T> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return Outcome::err(format!("Network error: {e}")),
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return Outcome::err(format!("Network error: {e}")),
    };

    if !status.is_success() {
        return Outcome::err(error_message(status, &body));
    }

    match serde_json::from_str(&body) {
        Ok(data) => Outcome::ok(success_message, Some(data)),
        Err(e) => Outcome::err(format!("Failed to parse response: {e}")),
    }
}

/// Failure message preference: structured `message` field, then `error`
/// field, then the raw body, then a generic status line.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
        if let Some(error) = value.get("error").and_then(|v| v.as_str()) {
            return error.to_string();
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    format!("Request failed with status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn contact_json(id: i64, name: &str, email: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "leadId": null,
            "name": name,
            "email": email,
            "phone": null,
            "role": null,
            "addressId": null,
            "contactRewardsId": null,
            "photo": null,
            "notes": null,
        })
    }

    #[tokio::test]
    async fn list_contacts_returns_data_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/contacts")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!([contact_json(1, "Ana", "a@x.com")]).to_string(),
            )
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        let outcome = client.list_contacts().await;

        mock.assert_async().await;
        assert!(outcome.success);
        let contacts = outcome.data.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn structured_message_field_is_preferred() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/contacts/7")
            .with_status(404)
            .with_body(r#"{"error":"not_found","message":"resource not found","code":"NOT_FOUND"}"#)
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        let outcome = client.get_contact(7).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "resource not found");
        assert!(outcome.data.is_none());
    }

    #[tokio::test]
    async fn error_field_is_used_when_message_is_absent() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/contacts/7")
            .with_status(500)
            .with_body(r#"{"error":"boom"}"#)
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        let outcome = client.get_contact(7).await;
        assert_eq!(outcome.message, "boom");
    }

    #[tokio::test]
    async fn raw_body_then_generic_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/contacts/1")
            .with_status(500)
            .with_body("plain text failure")
            .create_async()
            .await;
        server
            .mock("GET", "/api/contacts/2")
            .with_status(502)
            .with_body("")
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        assert_eq!(client.get_contact(1).await.message, "plain text failure");
        assert!(client
            .get_contact(2)
            .await
            .message
            .contains("502"));
    }

    #[tokio::test]
    async fn non_json_success_body_is_a_parse_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/contacts")
            .with_status(200)
            .with_body("<html>surprise</html>")
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        let outcome = client.list_contacts().await;
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Failed to parse response"));
    }

    #[tokio::test]
    async fn update_refetches_then_puts_the_merged_record() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/contacts/3")
            .with_status(200)
            .with_body(contact_json(3, "Ana", "a@x.com").to_string())
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/api/contacts/3")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Ana Maria",
                "email": "a@x.com",
            })))
            .with_status(200)
            .with_body(contact_json(3, "Ana Maria", "a@x.com").to_string())
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        let changes = ContactPatch {
            name: Some(Some("Ana Maria".to_string())),
            ..ContactPatch::default()
        };
        let outcome = client.update_contact(3, &changes).await;

        put.assert_async().await;
        assert!(outcome.success);
        assert_eq!(outcome.data.unwrap().name.as_deref(), Some("Ana Maria"));
    }

    #[tokio::test]
    async fn update_surfaces_the_fetch_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/contacts/9")
            .with_status(404)
            .with_body(r#"{"message":"resource not found"}"#)
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        let outcome = client
            .update_contact(9, &ContactPatch::default())
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "resource not found");
    }

    #[tokio::test]
    async fn delete_maps_204_to_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/contacts/4")
            .with_status(204)
            .create_async()
            .await;

        let client = ContactsClient::new(server.url(), "tok");
        assert!(client.delete_contact(4).await.success);
    }
}
