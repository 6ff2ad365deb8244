use std::fmt;

// ============================================================================
// NASA Domain Types
// ============================================================================

/// Astronomy Picture of the Day for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPicture {
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub copyright: Option<String>,
}

impl DailyPicture {
    pub fn new(
        image_url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            title: title.into(),
            description: description.into(),
            date: None,
            copyright: None,
        }
    }

    /// Alt text for the image, the picture's title
    pub fn alt_text(&self) -> &str {
        &self.title
    }
}

/// A single photo taken by a Mars rover
#[derive(Debug, Clone, PartialEq)]
pub struct RoverPhoto {
    pub image_url: String,
    pub rover_name: String,
    pub camera: Option<String>,
}

impl RoverPhoto {
    pub fn new(image_url: impl Into<String>, rover_name: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            rover_name: rover_name.into(),
            camera: None,
        }
    }

    pub fn alt_text(&self) -> String {
        format!("Mars Rover - {}", self.rover_name)
    }
}

/// The two independent features of the explorer view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    DailyPicture,
    RoverPhotos,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::DailyPicture => "daily_picture",
            Feature::RoverPhotos => "rover_photos",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
