use std::sync::{Arc, RwLock};

use common::{ApiMessage, AuthResponse, BookDto, BookForm, Credentials, RegisterPayload};
use reqwest::{
    multipart::{Form, Part},
    RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::config::ApiConfig;
use crate::error::ClientError;

/// HTTP access to the library API.
///
/// Clones share the underlying connection pool and the bearer token, so a
/// login through one handle authenticates all of them.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let builder = reqwest::Client::builder();
        // Timeouts are left to the browser on wasm.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.timeout_secs));
        Ok(Self::with_http(builder.build()?, config.base_url.clone()))
    }

    fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    // --- Books ---

    pub async fn list_books(&self) -> Result<Vec<BookDto>, ClientError> {
        self.send_json(self.with_optional_auth(self.http.get(self.url("/books"))))
            .await
    }

    pub async fn get_book(&self, id: &str) -> Result<BookDto, ClientError> {
        let url = self.url(&format!("/books/{id}"));
        self.send_json(self.with_optional_auth(self.http.get(url)))
            .await
    }

    pub async fn my_created_books(&self) -> Result<Vec<BookDto>, ClientError> {
        let request = self.authorized(self.http.get(self.url("/books/mycreatedbooks")))?;
        self.send_json(request).await
    }

    pub async fn my_borrowed_books(&self) -> Result<Vec<BookDto>, ClientError> {
        let request = self.authorized(self.http.get(self.url("/books/myborrowedbooks")))?;
        self.send_json(request).await
    }

    pub async fn create_book(&self, form: &BookForm) -> Result<(), ClientError> {
        form.validate()?;
        let request = self.authorized(self.http.post(self.url("/books")))?;
        tracing::info!("Creating book '{}'", form.title);
        self.send_empty(request.multipart(book_multipart(form)?))
            .await
    }

    pub async fn update_book(&self, id: &str, form: &BookForm) -> Result<(), ClientError> {
        form.validate()?;
        let request = self.authorized(self.http.put(self.url(&format!("/books/{id}"))))?;
        tracing::info!("Updating book {}", id);
        self.send_empty(request.multipart(book_multipart(form)?))
            .await
    }

    pub async fn delete_book(&self, id: &str) -> Result<(), ClientError> {
        let request = self.authorized(self.http.delete(self.url(&format!("/books/{id}"))))?;
        tracing::info!("Deleting book {}", id);
        self.send_empty(request).await
    }

    pub async fn borrow_book(&self, id: &str) -> Result<(), ClientError> {
        let request =
            self.authorized(self.http.post(self.url(&format!("/books/{id}/borrow"))))?;
        self.send_empty(request).await
    }

    pub async fn return_book(&self, id: &str) -> Result<(), ClientError> {
        let request =
            self.authorized(self.http.post(self.url(&format!("/books/{id}/return"))))?;
        self.send_empty(request).await
    }

    // --- Auth ---

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ClientError> {
        credentials.validate()?;
        let request = self.http.post(self.url("/auth/login")).json(credentials);
        self.send_json(request).await
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, ClientError> {
        payload.validate()?;
        let request = self.http.post(self.url("/auth/register")).json(payload);
        self.send_json(request).await
    }

    // --- Plumbing ---

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        match self.token() {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(ClientError::Unauthenticated),
        }
    }

    fn with_optional_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        send(request).await.map(|_| ())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request.send().await.map_err(|e| {
        tracing::error!("Error sending request: {}", e);
        ClientError::from(e)
    })?;
    let status = response.status();
    tracing::debug!("{} {}", status, response.url());

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .ok()
        .and_then(ApiMessage::into_text);
    tracing::warn!("API request failed with {}: {}", status, body);
    Err(ClientError::Api { status, message })
}

fn book_multipart(form: &BookForm) -> Result<Form, ClientError> {
    let mut multipart = Form::new();
    for (name, value) in form.text_fields() {
        multipart = multipart.text(name, value);
    }
    if let Some(image) = &form.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        multipart = multipart.part("image", part);
    }
    Ok(multipart)
}
