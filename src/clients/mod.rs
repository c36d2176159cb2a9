/// External API clients module
use crate::domain::{ImageOfDay, PhotoRecord, RoverManifest};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// NASA endpoints the gallery reads from
#[async_trait]
pub trait MarsApi: Send + Sync {
    /// Most recent sol of photos for an active rover
    async fn fetch_latest_photos(&self, rover: &str) -> AppResult<Vec<PhotoRecord>>;

    /// All photos a rover took on one sol
    async fn fetch_photos_for_sol(&self, rover: &str, sol: u32) -> AppResult<Vec<PhotoRecord>>;

    async fn fetch_manifest(&self, rover: &str) -> AppResult<RoverManifest>;

    /// Astronomy Picture of the Day
    async fn fetch_image_of_day(&self) -> AppResult<ImageOfDay>;
}

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("red-planet-gallery/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

#[derive(Deserialize)]
struct LatestPhotosResponse {
    #[serde(default)]
    latest_photos: Vec<PhotoRecord>,
}

#[derive(Deserialize)]
struct SolPhotosResponse {
    #[serde(default)]
    photos: Vec<PhotoRecord>,
}

#[derive(Deserialize)]
struct ManifestResponse {
    photo_manifest: RoverManifest,
}

#[derive(Deserialize)]
struct ApodResponse {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    media_type: String,
    thumbnail_url: Option<String>,
}

impl From<ApodResponse> for ImageOfDay {
    fn from(apod: ApodResponse) -> Self {
        Self {
            image_url: apod.url,
            title: apod.title,
            description: apod.explanation,
            media_type: apod.media_type,
            thumbnail_url: apod.thumbnail_url,
        }
    }
}

/// NASA open APIs client (APOD, Mars Rover Photos)
pub struct NasaClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn rovers_url(&self, rover: &str, tail: &str) -> String {
        format!(
            "{}/mars-photos/api/v1/rovers/{}/{}",
            self.base_url,
            rover.to_lowercase(),
            tail
        )
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let mut req = self.http_client.get_client().get(url);
        if !self.api_key.is_empty() {
            req = req.query(&[("api_key", &self.api_key)]);
        }
        req
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        req: RequestBuilder,
    ) -> AppResult<T> {
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(AppError::UpstreamStatus {
                endpoint: endpoint.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl MarsApi for NasaClient {
    async fn fetch_latest_photos(&self, rover: &str) -> AppResult<Vec<PhotoRecord>> {
        let req = self.get(&self.rovers_url(rover, "latest_photos"));
        let body: LatestPhotosResponse = self.send_json("latest_photos", req).await?;
        Ok(body.latest_photos)
    }

    async fn fetch_photos_for_sol(&self, rover: &str, sol: u32) -> AppResult<Vec<PhotoRecord>> {
        let req = self
            .get(&self.rovers_url(rover, "photos"))
            .query(&[("sol", sol)]);
        let body: SolPhotosResponse = self.send_json("photos", req).await?;
        Ok(body.photos)
    }

    async fn fetch_manifest(&self, rover: &str) -> AppResult<RoverManifest> {
        let url = format!(
            "{}/mars-photos/api/v1/manifests/{}",
            self.base_url,
            rover.to_lowercase()
        );
        let body: ManifestResponse = self.send_json("manifests", self.get(&url)).await?;
        Ok(body.photo_manifest)
    }

    async fn fetch_image_of_day(&self) -> AppResult<ImageOfDay> {
        let url = format!("{}/planetary/apod", self.base_url);
        let req = self.get(&url).query(&[("thumbs", "true")]);
        let body: ApodResponse = self.send_json("apod", req).await?;
        Ok(body.into())
    }
}
