use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::types::{DownloadError, ResultItem, RunError, UploadFile, ZipQuery};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the optimization service, e.g. `http://localhost:3655`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3655".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Uploads can be slow on the user's side of the wire; keep the
            // ceiling well above the 15 MiB upload limit at modest bandwidth.
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// The remote service surface the workflow talks to. The engine only ever
/// sees this trait; tests substitute their own implementation.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// POST one file to `/api/optimize` as a single-field multipart body.
    async fn optimize(&self, file: &UploadFile) -> Result<Vec<ResultItem>, RunError>;

    /// POST all files plus the `baseName` field to `/api/rename` in one
    /// multipart request.
    async fn rename(
        &self,
        files: &[UploadFile],
        base_name: &str,
    ) -> Result<Vec<ResultItem>, RunError>;

    /// GET one result body; `url` may be service-relative.
    async fn fetch(&self, url: &str) -> Result<Bytes, DownloadError>;

    /// GET the ZIP bundle for `query` from `/api/download-zip`.
    async fn fetch_zip(&self, query: &ZipQuery) -> Result<Bytes, DownloadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ClientSettings,
}

impl ReqwestApiClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, RunError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| RunError::Network(err.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Resolves a possibly service-relative download URL against the base.
    fn resolve(&self, raw: &str) -> Result<Url, DownloadError> {
        let base = Url::parse(&self.settings.base_url)
            .map_err(|err| DownloadError::Network(err.to_string()))?;
        base.join(raw)
            .map_err(|err| DownloadError::Network(err.to_string()))
    }

    /// Builds the bundle URL, keyed by session when one is shared and by the
    /// comma-joined filename list otherwise.
    pub fn zip_url(&self, query: &ZipQuery) -> Result<Url, DownloadError> {
        let mut url = Url::parse(&self.endpoint("/api/download-zip"))
            .map_err(|err| DownloadError::Network(err.to_string()))?;
        match query {
            ZipQuery::Session(session) => {
                url.query_pairs_mut().append_pair("session", session);
            }
            ZipQuery::Files(names) => {
                url.query_pairs_mut().append_pair("files", &names.join(","));
            }
        }
        Ok(url)
    }

    async fn read_upload(&self, file: &UploadFile) -> Result<Part, RunError> {
        let data = tokio::fs::read(&file.path)
            .await
            .map_err(|err| RunError::FileRead {
                name: file.name.clone(),
                message: err.to_string(),
            })?;
        Part::bytes(data)
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|err| RunError::Network(err.to_string()))
    }

    async fn get(&self, url: Url) -> Result<Bytes, DownloadError> {
        let client = self
            .build_client()
            .map_err(|err| DownloadError::Network(err.to_string()))?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| DownloadError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }
        response
            .bytes()
            .await
            .map_err(|err| DownloadError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn optimize(&self, file: &UploadFile) -> Result<Vec<ResultItem>, RunError> {
        let part = self.read_upload(file).await?;
        let form = Form::new().part("file", part);

        let response = self
            .build_client()?
            .post(self.endpoint("/api/optimize"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| RunError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The optimize endpoint's error bodies carry nothing useful.
            return Err(RunError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| RunError::Network(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| RunError::InvalidResponse(err.to_string()))
    }

    async fn rename(
        &self,
        files: &[UploadFile],
        base_name: &str,
    ) -> Result<Vec<ResultItem>, RunError> {
        let mut form = Form::new().text("baseName", base_name.to_string());
        for file in files {
            let part = self.read_upload(file).await?;
            form = form.part("files", part);
        }

        let response = self
            .build_client()?
            .post(self.endpoint("/api/rename"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| RunError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RunError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| RunError::Network(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| RunError::InvalidResponse(err.to_string()))
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, DownloadError> {
        let url = self.resolve(url)?;
        self.get(url).await
    }

    async fn fetch_zip(&self, query: &ZipQuery) -> Result<Bytes, DownloadError> {
        let url = self.zip_url(query)?;
        self.get(url).await
    }
}
