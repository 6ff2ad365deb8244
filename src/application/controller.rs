use crate::entities::{DailyPicture, Feature, RoverPhoto};
use crate::infrastructure::{DEFAULT_ROVER, FetchError};
use tracing::{debug, info, warn};

/// Identifies one issued request of a feature
pub type Sequence = u64;

/// In-flight bookkeeping for one feature.
///
/// Every request gets the next sequence number. Only the outcome of the most
/// recently issued request is allowed to touch state or clear the in-flight
/// flag; anything older is stale.
#[derive(Debug, Default, Clone)]
pub struct RequestTracker {
    latest: Sequence,
    in_flight: bool,
}

impl RequestTracker {
    pub fn begin(&mut self) -> Sequence {
        self.latest += 1;
        self.in_flight = true;
        self.latest
    }

    /// Returns false when `sequence` has been superseded
    pub fn finish(&mut self, sequence: Sequence) -> bool {
        if sequence != self.latest {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[cfg(test)]
    pub(crate) fn latest(&self) -> Sequence {
        self.latest
    }
}

/// A GET the controller wants performed
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    DailyPicture {
        sequence: Sequence,
        date: Option<String>,
    },
    RoverPhotos {
        sequence: Sequence,
        rover: String,
        earth_date: String,
    },
}

impl FetchRequest {
    pub fn feature(&self) -> Feature {
        match self {
            FetchRequest::DailyPicture { .. } => Feature::DailyPicture,
            FetchRequest::RoverPhotos { .. } => Feature::RoverPhotos,
        }
    }
}

/// A resolved request, handed back to the controller
#[derive(Debug)]
pub enum FetchOutcome {
    DailyPicture {
        sequence: Sequence,
        result: Result<DailyPicture, FetchError>,
    },
    RoverPhotos {
        sequence: Sequence,
        result: Result<Vec<RoverPhoto>, FetchError>,
    },
}

/// What applying an outcome did to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Failed,
    Stale,
}

/// UI state of the explorer screen.
///
/// The controller never performs I/O: fetch operations return a
/// [`FetchRequest`] for the dispatcher to run, and [`ViewController::apply`]
/// folds the outcome back in.
#[derive(Debug, Clone)]
pub struct ViewController {
    daily_date: String,
    rover_date: String,
    default_rover: String,
    daily_picture: Option<DailyPicture>,
    rover_photos: Vec<RoverPhoto>,
    daily_requests: RequestTracker,
    rover_requests: RequestTracker,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(DEFAULT_ROVER)
    }
}

impl ViewController {
    pub fn new(default_rover: impl Into<String>) -> Self {
        Self {
            daily_date: String::new(),
            rover_date: String::new(),
            default_rover: default_rover.into(),
            daily_picture: None,
            rover_photos: Vec::new(),
            daily_requests: RequestTracker::default(),
            rover_requests: RequestTracker::default(),
        }
    }

    /// Initial load: today's picture
    pub fn on_mount(&mut self) -> FetchRequest {
        self.fetch_daily_picture(None)
    }

    pub fn fetch_daily_picture(&mut self, date: Option<&str>) -> FetchRequest {
        let sequence = self.daily_requests.begin();
        let date = date.filter(|d| !d.is_empty()).map(str::to_string);
        info!(feature = %Feature::DailyPicture, sequence, date = ?date, "fetching daily picture");

        FetchRequest::DailyPicture { sequence, date }
    }

    pub fn fetch_rover_photos(&mut self, date: Option<&str>, rover: Option<&str>) -> FetchRequest {
        let sequence = self.rover_requests.begin();
        let earth_date = date.unwrap_or_default().to_string();
        let rover = rover.unwrap_or(self.default_rover.as_str()).to_string();
        info!(feature = %Feature::RoverPhotos, sequence, %rover, %earth_date, "fetching rover photos");

        FetchRequest::RoverPhotos {
            sequence,
            rover,
            earth_date,
        }
    }

    pub fn set_daily_date(&mut self, date: impl Into<String>) {
        self.daily_date = date.into();
    }

    pub fn set_rover_date(&mut self, date: impl Into<String>) {
        self.rover_date = date.into();
    }

    pub fn submit_daily_picture(&mut self) -> FetchRequest {
        let date = self.daily_date.clone();
        self.fetch_daily_picture(Some(&date))
    }

    pub fn submit_rover_photos(&mut self) -> FetchRequest {
        let date = self.rover_date.clone();
        self.fetch_rover_photos(Some(&date), None)
    }

    /// Fold a resolved request into the view.
    ///
    /// Failures leave existing data untouched.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        match outcome {
            FetchOutcome::DailyPicture { sequence, result } => {
                if !self.daily_requests.finish(sequence) {
                    debug!(feature = %Feature::DailyPicture, sequence, "discarding stale response");
                    return Applied::Stale;
                }
                match result {
                    Ok(picture) => {
                        self.daily_picture = Some(picture);
                        Applied::Updated
                    }
                    Err(error) => {
                        warn!(feature = %Feature::DailyPicture, kind = error.kind(), %error, "request failed");
                        Applied::Failed
                    }
                }
            }
            FetchOutcome::RoverPhotos { sequence, result } => {
                if !self.rover_requests.finish(sequence) {
                    debug!(feature = %Feature::RoverPhotos, sequence, "discarding stale response");
                    return Applied::Stale;
                }
                match result {
                    Ok(photos) => {
                        self.rover_photos = photos;
                        Applied::Updated
                    }
                    Err(error) => {
                        warn!(feature = %Feature::RoverPhotos, kind = error.kind(), %error, "request failed");
                        Applied::Failed
                    }
                }
            }
        }
    }

    /// True while the latest request of either feature is unresolved
    pub fn is_loading(&self) -> bool {
        self.daily_requests.is_in_flight() || self.rover_requests.is_in_flight()
    }

    pub fn is_in_flight(&self, feature: Feature) -> bool {
        match feature {
            Feature::DailyPicture => self.daily_requests.is_in_flight(),
            Feature::RoverPhotos => self.rover_requests.is_in_flight(),
        }
    }

    pub fn daily_date(&self) -> &str {
        &self.daily_date
    }

    pub fn rover_date(&self) -> &str {
        &self.rover_date
    }

    pub fn default_rover(&self) -> &str {
        &self.default_rover
    }

    pub fn daily_picture(&self) -> Option<&DailyPicture> {
        self.daily_picture.as_ref()
    }

    pub fn rover_photos(&self) -> &[RoverPhoto] {
        &self.rover_photos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::fake_api::unavailable;

    fn picture(title: &str) -> DailyPicture {
        DailyPicture::new(format!("https://apod.nasa.gov/{title}.jpg"), title, "text")
    }

    fn sequence_of(request: &FetchRequest) -> Sequence {
        match request {
            FetchRequest::DailyPicture { sequence, .. } => *sequence,
            FetchRequest::RoverPhotos { sequence, .. } => *sequence,
        }
    }

    #[test]
    fn mount_requests_todays_picture() {
        let mut controller = ViewController::default();
        let request = controller.on_mount();

        assert_eq!(
            request,
            FetchRequest::DailyPicture {
                sequence: 1,
                date: None
            }
        );
        assert!(controller.is_loading());
        assert!(controller.is_in_flight(Feature::DailyPicture));
        assert!(!controller.is_in_flight(Feature::RoverPhotos));
    }

    #[test]
    fn input_handlers_store_text_verbatim() {
        let mut controller = ViewController::default();
        controller.set_daily_date("2020-13-45");
        controller.set_rover_date("yesterday");

        assert_eq!(controller.daily_date(), "2020-13-45");
        assert_eq!(controller.rover_date(), "yesterday");
        assert!(!controller.is_loading());
    }

    #[test]
    fn submit_daily_passes_selected_date() {
        let mut controller = ViewController::default();
        controller.set_daily_date("2020-01-01");

        match controller.submit_daily_picture() {
            FetchRequest::DailyPicture { date, .. } => {
                assert_eq!(date.as_deref(), Some("2020-01-01"))
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn submit_daily_with_empty_field_asks_for_today() {
        let mut controller = ViewController::default();
        match controller.submit_daily_picture() {
            FetchRequest::DailyPicture { date, .. } => assert!(date.is_none()),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn submit_rover_uses_default_rover() {
        let mut controller = ViewController::default();
        controller.set_rover_date("2021-06-01");

        assert_eq!(
            controller.submit_rover_photos(),
            FetchRequest::RoverPhotos {
                sequence: 1,
                rover: "curiosity".to_string(),
                earth_date: "2021-06-01".to_string(),
            }
        );
    }

    #[test]
    fn fetch_rover_photos_accepts_other_rover() {
        let mut controller = ViewController::new("perseverance");
        match controller.fetch_rover_photos(None, Some("spirit")) {
            FetchRequest::RoverPhotos {
                rover, earth_date, ..
            } => {
                assert_eq!(rover, "spirit");
                assert_eq!(earth_date, "");
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert_eq!(controller.default_rover(), "perseverance");
    }

    #[test]
    fn success_replaces_picture_wholesale() {
        let mut controller = ViewController::default();
        let first = controller.on_mount();
        let mut with_credit = picture("first");
        with_credit.copyright = Some("Someone".to_string());
        controller.apply(FetchOutcome::DailyPicture {
            sequence: sequence_of(&first),
            result: Ok(with_credit),
        });

        controller.set_daily_date("2020-01-01");
        let second = controller.submit_daily_picture();
        let applied = controller.apply(FetchOutcome::DailyPicture {
            sequence: sequence_of(&second),
            result: Ok(picture("second")),
        });

        assert_eq!(applied, Applied::Updated);
        assert_eq!(controller.daily_picture(), Some(&picture("second")));
        assert!(!controller.is_loading());
    }

    #[test]
    fn empty_photo_list_replaces_previous_photos() {
        let mut controller = ViewController::default();
        let first = controller.submit_rover_photos();
        controller.apply(FetchOutcome::RoverPhotos {
            sequence: sequence_of(&first),
            result: Ok(vec![RoverPhoto::new("1.jpg", "Curiosity")]),
        });
        assert_eq!(controller.rover_photos().len(), 1);

        let second = controller.submit_rover_photos();
        controller.apply(FetchOutcome::RoverPhotos {
            sequence: sequence_of(&second),
            result: Ok(vec![]),
        });
        assert!(controller.rover_photos().is_empty());
    }

    #[test]
    fn failure_keeps_existing_data_and_clears_loading() {
        let mut controller = ViewController::default();
        let first = controller.on_mount();
        controller.apply(FetchOutcome::DailyPicture {
            sequence: sequence_of(&first),
            result: Ok(picture("kept")),
        });

        let second = controller.fetch_daily_picture(Some("1900-01-01"));
        assert!(controller.is_loading());

        let applied = controller.apply(FetchOutcome::DailyPicture {
            sequence: sequence_of(&second),
            result: Err(unavailable()),
        });

        assert_eq!(applied, Applied::Failed);
        assert_eq!(controller.daily_picture(), Some(&picture("kept")));
        assert!(!controller.is_loading());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut controller = ViewController::default();
        let older = controller.fetch_daily_picture(Some("2020-01-01"));
        let newer = controller.fetch_daily_picture(Some("2020-01-02"));

        // Newer resolves first, older arrives late
        controller.apply(FetchOutcome::DailyPicture {
            sequence: sequence_of(&newer),
            result: Ok(picture("newer")),
        });
        let applied = controller.apply(FetchOutcome::DailyPicture {
            sequence: sequence_of(&older),
            result: Ok(picture("older")),
        });

        assert_eq!(applied, Applied::Stale);
        assert_eq!(controller.daily_picture(), Some(&picture("newer")));
    }

    #[test]
    fn stale_response_does_not_clear_in_flight() {
        let mut controller = ViewController::default();
        let older = controller.submit_rover_photos();
        let _newer = controller.submit_rover_photos();

        controller.apply(FetchOutcome::RoverPhotos {
            sequence: sequence_of(&older),
            result: Ok(vec![RoverPhoto::new("old.jpg", "Curiosity")]),
        });

        assert!(controller.is_in_flight(Feature::RoverPhotos));
        assert!(controller.rover_photos().is_empty());
    }

    #[test]
    fn features_track_loading_independently() {
        let mut controller = ViewController::default();
        let daily = controller.on_mount();
        let rover = controller.submit_rover_photos();

        controller.apply(FetchOutcome::DailyPicture {
            sequence: sequence_of(&daily),
            result: Ok(picture("today")),
        });
        // Rover request still running
        assert!(controller.is_loading());
        assert!(!controller.is_in_flight(Feature::DailyPicture));

        controller.apply(FetchOutcome::RoverPhotos {
            sequence: sequence_of(&rover),
            result: Err(unavailable()),
        });
        assert!(!controller.is_loading());
    }

    #[test]
    fn tracker_sequences_increase() {
        let mut tracker = RequestTracker::default();
        assert_eq!(tracker.begin(), 1);
        assert_eq!(tracker.begin(), 2);
        assert!(!tracker.finish(1));
        assert!(tracker.is_in_flight());
        assert!(tracker.finish(2));
        assert!(!tracker.is_in_flight());
        assert_eq!(tracker.latest(), 2);
    }
}
