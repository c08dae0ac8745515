//! Reqwest-backed [`ChatApi`] implementation.
//!
//! Endpoint layout follows the service's REST surface under
//! `/api/v1/user` and `/api/v1/chat`. Attachment uploads use multipart
//! forms with the sender id as a field.

use async_trait::async_trait;
use banter_core::Attachment;
use banter_proto::{Conversation, User, UserId};
use reqwest::multipart::{Form, Part};

use crate::api::{ApiError, ChatApi, MessagePage};

/// HTTP client for the Banter REST surface.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client against the given base URL, e.g.
    /// `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    fn chat_url(&self, rest: &str) -> String {
        format!("{}/api/v1/chat/{rest}", self.base_url)
    }

    fn user_url(&self, rest: &str) -> String {
        format!("{}/api/v1/user/{rest}", self.base_url)
    }
}

fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status { status: response.status().as_u16() })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

#[async_trait]
impl ChatApi for HttpApi {
    async fn fetch_conversation(&self, id: &str) -> Result<Option<Conversation>, ApiError> {
        let response = self.http.get(self.chat_url(id)).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(check(response)?.json().await?)
    }

    async fn fetch_messages(
        &self,
        id: &str,
        page: u32,
        limit: u32,
    ) -> Result<MessagePage, ApiError> {
        let url = self.chat_url(&format!("{id}/messages"));
        let response = self
            .http
            .get(url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn fetch_user(&self, id: &str) -> Result<User, ApiError> {
        let response = self.http.get(self.user_url(id)).send().await?;
        Ok(check(response)?.json().await?)
    }

    async fn fetch_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, ApiError> {
        let response = self.http.get(self.chat_url(&format!("user/{user_id}"))).send().await?;
        Ok(check(response)?.json().await?)
    }

    async fn create_conversation(
        &self,
        user_id: &str,
        members: &[UserId],
        is_group: bool,
        group_name: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "members": members,
            "is_group": is_group,
            "groupName": group_name,
        });
        let response = self.http.post(self.chat_url(user_id)).json(&body).send().await?;
        check(response)?;
        Ok(())
    }

    async fn update_group_name(&self, id: &str, name: &str) -> Result<(), ApiError> {
        let url = self.chat_url(&format!("{id}/update-name"));
        let response = self.http.patch(url).json(&serde_json::json!({ "name": name })).send().await?;
        check(response)?;
        Ok(())
    }

    async fn add_member(&self, id: &str, member_id: &str) -> Result<(), ApiError> {
        let url = self.chat_url(&format!("{id}/add-member"));
        let response = self.http.post(url).query(&[("memberId", member_id)]).send().await?;
        check(response)?;
        Ok(())
    }

    async fn remove_member(&self, id: &str, member_id: &str) -> Result<(), ApiError> {
        let url = self.chat_url(&format!("{id}/remove-member"));
        let response = self.http.post(url).query(&[("memberId", member_id)]).send().await?;
        check(response)?;
        Ok(())
    }

    async fn delete_conversation(&self, id: &str) -> Result<(), ApiError> {
        let response = self.http.delete(self.chat_url(id)).send().await?;
        check(response)?;
        Ok(())
    }

    async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<(), ApiError> {
        let url = self.user_url(&format!("{user_id}/friend"));
        let response = self
            .http
            .delete(url)
            .json(&serde_json::json!({ "friend_id": friend_id }))
            .send()
            .await?;
        check(response)?;
        Ok(())
    }

    async fn upload_attachment(
        &self,
        id: &str,
        sender_id: &str,
        attachment: &Attachment,
    ) -> Result<(), ApiError> {
        let endpoint = match attachment.kind {
            banter_core::AttachmentKind::File => format!("{id}/upload-file"),
            banter_core::AttachmentKind::Image => format!("{id}/upload-image"),
        };
        let part = Part::bytes(attachment.data.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.mime_type)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let form = Form::new().text("sender_id", sender_id.to_owned()).part("file", part);

        let response = self.http.post(self.chat_url(&endpoint)).multipart(form).send().await?;
        check(response)?;
        Ok(())
    }
}
