use crate::entities::{DailyPicture, RoverPhoto};
use crate::infrastructure::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";
pub const DEFAULT_ROVER: &str = "curiosity";

/// Read-only access to the two NASA endpoints used by the explorer
#[async_trait]
pub trait NasaApi: Send + Sync {
    /// Fetch the Astronomy Picture of the Day. `None` (or an empty date) lets
    /// the server pick today.
    async fn daily_picture(&self, date: Option<&str>) -> Result<DailyPicture, FetchError>;

    /// Fetch every photo taken by `rover` on `earth_date`
    async fn rover_photos(
        &self,
        rover: &str,
        earth_date: &str,
    ) -> Result<Vec<RoverPhoto>, FetchError>;
}

// Wire formats

#[derive(Debug, Deserialize)]
struct ApodResponse {
    url: String,
    title: String,
    explanation: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    copyright: Option<String>,
}

impl From<ApodResponse> for DailyPicture {
    fn from(response: ApodResponse) -> Self {
        Self {
            image_url: response.url,
            title: response.title,
            description: response.explanation,
            date: response.date,
            // APOD pads the credit line with newlines
            copyright: response.copyright.map(|c| c.trim().to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoverPhotosResponse {
    photos: Vec<RoverPhotoResponse>,
}

#[derive(Debug, Deserialize)]
struct RoverPhotoResponse {
    img_src: String,
    rover: RoverResponse,
    #[serde(default)]
    camera: Option<CameraResponse>,
}

#[derive(Debug, Deserialize)]
struct RoverResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CameraResponse {
    #[serde(default)]
    full_name: Option<String>,
}

impl From<RoverPhotoResponse> for RoverPhoto {
    fn from(response: RoverPhotoResponse) -> Self {
        Self {
            image_url: response.img_src,
            rover_name: response.rover.name,
            camera: response.camera.and_then(|c| c.full_name),
        }
    }
}

/// HTTP client for api.nasa.gov
pub struct NasaClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
}

impl NasaClient {
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// `GET /planetary/apod?api_key=<key>[&date=<date>]`
    pub fn daily_picture_url(&self, date: Option<&str>) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&["planetary", "apod"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            if let Some(date) = date.filter(|d| !d.is_empty()) {
                query.append_pair("date", date);
            }
        }
        Ok(url)
    }

    /// `GET /mars-photos/api/v1/rovers/<rover>/photos?earth_date=<date>&api_key=<key>`
    pub fn rover_photos_url(&self, rover: &str, earth_date: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&["mars-photos", "api", "v1", "rovers", rover, "photos"])?;
        url.query_pairs_mut()
            .append_pair("earth_date", earth_date)
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        // Only the path is logged, the query carries the API key
        let path = url.path().to_string();
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        debug!(%path, %status, "NASA API responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::UnexpectedStatus { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl NasaApi for NasaClient {
    async fn daily_picture(&self, date: Option<&str>) -> Result<DailyPicture, FetchError> {
        let url = self.daily_picture_url(date)?;
        let response: ApodResponse = self.get_json(url).await?;
        Ok(response.into())
    }

    async fn rover_photos(
        &self,
        rover: &str,
        earth_date: &str,
    ) -> Result<Vec<RoverPhoto>, FetchError> {
        let url = self.rover_photos_url(rover, earth_date)?;
        let response: RoverPhotosResponse = self.get_json(url).await?;
        Ok(response.photos.into_iter().map(RoverPhoto::from).collect())
    }
}
