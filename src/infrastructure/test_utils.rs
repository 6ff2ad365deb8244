/// Test utilities for code that talks to the NASA API
///
/// Two harnesses are provided:
///
/// - [`fake_api::FakeNasaApi`] is an in-memory [`NasaApi`](crate::infrastructure::NasaApi)
///   with scripted responses that records every call it receives.
/// - [`stub_server::StubServer`] is a local axum server answering every request
///   with a fixed status and body, for exercising the real HTTP client.
///
/// ## Usage Examples
///
/// ```rust
/// use crate::infrastructure::test_utils::fake_api::FakeNasaApi;
///
/// #[tokio::test]
/// async fn my_test() {
///     let api = FakeNasaApi::new();
///     api.push_daily_picture(Ok(DailyPicture::new("url", "title", "text")));
///     // Hand `api` to a dispatcher...
/// }
/// ```
#[cfg(test)]
pub mod fake_api {
    use crate::entities::{DailyPicture, RoverPhoto};
    use crate::infrastructure::{FetchError, NasaApi};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A call received by the fake
    #[derive(Debug, Clone, PartialEq)]
    pub enum ApiCall {
        DailyPicture { date: Option<String> },
        RoverPhotos { rover: String, earth_date: String },
    }

    /// Scripted API; responses are consumed in the order they were pushed.
    /// An exhausted script answers with 404.
    #[derive(Default)]
    pub struct FakeNasaApi {
        calls: Mutex<Vec<ApiCall>>,
        daily_pictures: Mutex<VecDeque<Result<DailyPicture, FetchError>>>,
        rover_photos: Mutex<VecDeque<Result<Vec<RoverPhoto>, FetchError>>>,
    }

    impl FakeNasaApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_daily_picture(&self, response: Result<DailyPicture, FetchError>) {
            self.daily_pictures.lock().unwrap().push_back(response);
        }

        pub fn push_rover_photos(&self, response: Result<Vec<RoverPhoto>, FetchError>) {
            self.rover_photos.lock().unwrap().push_back(response);
        }

        pub fn calls(&self) -> Vec<ApiCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    /// A failure standing in for an unreachable server
    pub fn unavailable() -> FetchError {
        FetchError::UnexpectedStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "unavailable".to_string(),
        }
    }

    fn not_found() -> FetchError {
        FetchError::UnexpectedStatus {
            status: StatusCode::NOT_FOUND,
            body: "no scripted response".to_string(),
        }
    }

    #[async_trait]
    impl NasaApi for FakeNasaApi {
        async fn daily_picture(&self, date: Option<&str>) -> Result<DailyPicture, FetchError> {
            self.calls.lock().unwrap().push(ApiCall::DailyPicture {
                date: date.map(str::to_string),
            });
            self.daily_pictures
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(not_found()))
        }

        async fn rover_photos(
            &self,
            rover: &str,
            earth_date: &str,
        ) -> Result<Vec<RoverPhoto>, FetchError> {
            self.calls.lock().unwrap().push(ApiCall::RoverPhotos {
                rover: rover.to_string(),
                earth_date: earth_date.to_string(),
            });
            self.rover_photos
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(not_found()))
        }
    }
}

#[cfg(test)]
pub mod stub_server {
    use axum::Router;
    use axum::extract::State;
    use axum::http::{StatusCode, Uri};
    use std::sync::{Arc, Mutex};
    use tokio::task::JoinHandle;
    use url::Url;

    #[derive(Clone)]
    struct StubState {
        status: StatusCode,
        body: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    /// Local HTTP server that records request paths and queries
    pub struct StubServer {
        pub base_url: Url,
        requests: Arc<Mutex<Vec<String>>>,
        handle: JoinHandle<()>,
    }

    impl StubServer {
        /// Spin up a server on an ephemeral port answering every request with
        /// `status` and `body`
        pub async fn start(status: StatusCode, body: &str) -> Self {
            let requests = Arc::new(Mutex::new(Vec::new()));
            let state = StubState {
                status,
                body: body.to_string(),
                requests: Arc::clone(&requests),
            };
            let router = Router::new().fallback(respond).with_state(state);

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let address = listener.local_addr().unwrap();

            let handle = tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });

            Self {
                base_url: format!("http://{address}").parse().unwrap(),
                requests,
                handle,
            }
        }

        /// Every request received so far, as `path?query`
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Drop for StubServer {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    async fn respond(State(state): State<StubState>, uri: Uri) -> (StatusCode, String) {
        let target = uri
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| uri.path().to_string());
        state.requests.lock().unwrap().push(target);
        (state.status, state.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::fake_api::*;
    use crate::entities::DailyPicture;
    use crate::infrastructure::NasaApi;

    #[tokio::test]
    async fn fake_api_replays_script_in_order() {
        let api = FakeNasaApi::new();
        api.push_daily_picture(Ok(DailyPicture::new("a.jpg", "First", "one")));
        api.push_daily_picture(Err(unavailable()));

        assert_eq!(api.daily_picture(None).await.unwrap().title, "First");
        assert!(api.daily_picture(Some("2020-01-01")).await.is_err());
        // Script exhausted
        assert!(api.daily_picture(None).await.is_err());

        assert_eq!(
            api.calls(),
            vec![
                ApiCall::DailyPicture { date: None },
                ApiCall::DailyPicture {
                    date: Some("2020-01-01".to_string())
                },
                ApiCall::DailyPicture { date: None },
            ]
        );
    }

    #[tokio::test]
    async fn fake_api_records_rover_calls() {
        let api = FakeNasaApi::new();
        api.push_rover_photos(Ok(vec![]));

        assert!(api.rover_photos("curiosity", "2021-06-01").await.unwrap().is_empty());
        assert_eq!(
            api.calls(),
            vec![ApiCall::RoverPhotos {
                rover: "curiosity".to_string(),
                earth_date: "2021-06-01".to_string(),
            }]
        );
    }
}
