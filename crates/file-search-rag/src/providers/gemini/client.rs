//! Gemini API client for file search provisioning and grounded generation

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;

use super::auth::ApiKeyAuth;
use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::providers::file_search::FileSearchBackend;
use crate::providers::llm::LlmProvider;
use crate::types::{FileSearchStore, Operation, RemoteFile};

const API_VERSION: &str = "v1beta";
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Largest `pageSize` each listing accepts
const FILES_PAGE_SIZE: u32 = 100;
const STORES_PAGE_SIZE: u32 = 20;

/// Gemini client via the Generative Language API
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let auth = ApiKeyAuth::from_config(config)?;
        let http = auth.authorized_client(config.timeout_secs.map(Duration::from_secs))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// URL of a `v1beta` resource
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, path)
    }

    /// URL that starts a resumable upload
    fn upload_url(&self) -> String {
        format!("{}/upload/{}/files", self.base_url, API_VERSION)
    }

    fn generate_url(&self) -> String {
        self.api_url(&format!("models/{}:generateContent", self.model))
    }

    /// Turn a non-success status into `Error::Provider`
    async fn check(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::provider(
            status.as_u16(),
            format!("{} failed: {}", action, body),
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, action: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let response = Self::check(response, action).await?;
        Ok(response.json().await?)
    }

    /// Follow `nextPageToken` until the listing is exhausted
    async fn list_all<P: Page>(
        &self,
        path: &str,
        page_size: u32,
        action: &str,
    ) -> Result<Vec<P::Item>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(self.api_url(path))
                .query(&[("pageSize", page_size)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = Self::check(request.send().await?, action).await?;
            let page: P = response.json().await?;
            let (mut page_items, next) = page.into_parts();
            items.append(&mut page_items);

            match next {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Build the `generateContent` body
    fn build_request(
        system_instruction: &str,
        prompt: &str,
        store_names: &[Option<String>],
    ) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
            tools: vec![Tool {
                file_search: FileSearch {
                    file_search_store_names: store_names.to_vec(),
                },
            }],
        }
    }
}

/// One page of a list response
trait Page: DeserializeOwned {
    type Item;
    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListFilesResponse {
    #[serde(default)]
    files: Vec<RemoteFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl Page for ListFilesResponse {
    type Item = RemoteFile;
    fn into_parts(self) -> (Vec<RemoteFile>, Option<String>) {
        (self.files, self.next_page_token)
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListStoresResponse {
    #[serde(default)]
    file_search_stores: Vec<FileSearchStore>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl Page for ListStoresResponse {
    type Item = FileSearchStore;
    fn into_parts(self) -> (Vec<FileSearchStore>, Option<String>) {
        (self.file_search_stores, self.next_page_token)
    }
}

#[derive(serde::Deserialize)]
struct UploadResponse {
    file: RemoteFile,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    tools: Vec<Tool>,
}

#[derive(serde::Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    text: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    file_search: FileSearch,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct FileSearch {
    file_search_store_names: Vec<Option<String>>,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[async_trait]
impl FileSearchBackend for GeminiClient {
    async fn list_files(&self) -> Result<Vec<RemoteFile>> {
        self.list_all::<ListFilesResponse>("files", FILES_PAGE_SIZE, "List files")
            .await
    }

    async fn upload_file(&self, path: &Path, name: &str) -> Result<RemoteFile> {
        let data = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| name.to_string());

        let metadata = serde_json::json!({
            "file": {
                "name": format!("files/{}", name),
                "displayName": display_name,
            }
        });

        let start = self
            .http
            .post(self.upload_url())
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", data.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type.as_str())
            .json(&metadata)
            .send()
            .await?;
        let start = Self::check(start, "Start upload").await?;

        let session_url = start
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::provider(start.status().as_u16(), "Upload session URL missing"))?;

        let response = self
            .http
            .post(&session_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header(reqwest::header::CONTENT_TYPE, mime_type.as_str())
            .body(data)
            .send()
            .await?;
        let response = Self::check(response, "Upload file").await?;

        let uploaded: UploadResponse = response.json().await?;
        Ok(uploaded.file)
    }

    async fn list_stores(&self) -> Result<Vec<FileSearchStore>> {
        self.list_all::<ListStoresResponse>(
            "fileSearchStores",
            STORES_PAGE_SIZE,
            "List file search stores",
        )
        .await
    }

    async fn create_store(&self, display_name: &str) -> Result<FileSearchStore> {
        let response = self
            .http
            .post(self.api_url("fileSearchStores"))
            .json(&serde_json::json!({ "displayName": display_name }))
            .send()
            .await?;
        let response = Self::check(response, "Create file search store").await?;
        Ok(response.json().await?)
    }

    async fn import_file(&self, store_name: &str, file_name: &str) -> Result<Operation> {
        let response = self
            .http
            .post(self.api_url(&format!("{}:importFile", store_name)))
            .json(&serde_json::json!({ "fileName": file_name }))
            .send()
            .await?;
        let response = Self::check(response, "Import file").await?;
        Ok(response.json().await?)
    }

    async fn get_operation(&self, operation_name: &str) -> Result<Operation> {
        self.get_json(&self.api_url(operation_name), "Get operation")
            .await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate_grounded(
        &self,
        system_instruction: &str,
        prompt: &str,
        store_names: &[Option<String>],
    ) -> Result<String> {
        let request = Self::build_request(system_instruction, prompt, store_names);

        let response = self
            .http
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Gemini request failed: {}", e)))?;
        let response = Self::check(response, "Gemini generation").await?;

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse Gemini response: {}", e)))?;

        gen_response
            .text()
            .ok_or_else(|| Error::llm("No text in Gemini response"))
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
