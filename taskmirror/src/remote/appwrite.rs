//! Appwrite-backed [`DocumentService`].
//!
//! Thin REST client over one Appwrite project: `GET /account` for the
//! session's user, document create/patch against a databases collection.
//! Document identifiers are minted server-side via the `"unique()"`
//! sentinel.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;

use super::{AuthError, DocumentService, RemoteError, TaskDocument, UserIdentity};

pub struct AppwriteRemote {
    http: Client,
    endpoint: String,
    project_id: String,
    database_id: String,
    session: String,
}

impl AppwriteRemote {
    /// `endpoint` is the versioned API base, e.g.
    /// `https://cloud.appwrite.io/v1`. `session` is the secret of a
    /// signed-in user session; every call runs as that user.
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        database_id: impl Into<String>,
        session: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            endpoint,
            project_id: project_id.into(),
            database_id: database_id.into(),
            session: session.into(),
        }
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Session", &self.session)
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection
        )
    }

    async fn error_parts(response: Response) -> (u16, String) {
        let status = response.status().as_u16();
        let message = response
            .json::<ApiError>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| "unreadable error body".into());
        (status, message)
    }
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Deserialize)]
struct AccountResponse {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct DocumentResponse {
    #[serde(rename = "$id")]
    id: String,
}

#[async_trait::async_trait]
impl DocumentService for AppwriteRemote {
    async fn current_user(&self) -> Result<UserIdentity, AuthError> {
        let url = format!("{}/account", self.endpoint);
        let response = self.request(Method::GET, url).send().await?;
        if !response.status().is_success() {
            let (status, message) = Self::error_parts(response).await;
            return Err(AuthError::Rejected { status, message });
        }
        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        Ok(UserIdentity {
            id: account.id,
            name: account.name,
        })
    }

    async fn create_document(
        &self,
        collection: &str,
        document: TaskDocument,
    ) -> Result<String, RemoteError> {
        let body = serde_json::json!({
            "documentId": "unique()",
            "data": document,
        });
        let response = self
            .request(Method::POST, self.documents_url(collection))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            let (status, message) = Self::error_parts(response).await;
            return Err(RemoteError::Api { status, message });
        }
        let created: DocumentResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        log::debug!("appwrite: created document {}", created.id);
        Ok(created.id)
    }

    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        patch: serde_json::Value,
    ) -> Result<(), RemoteError> {
        let url = format!("{}/{}", self.documents_url(collection), document_id);
        let body = serde_json::json!({ "data": patch });
        let response = self.request(Method::PATCH, url).json(&body).send().await?;
        if !response.status().is_success() {
            let (status, message) = Self::error_parts(response).await;
            return Err(RemoteError::Api { status, message });
        }
        Ok(())
    }
}
