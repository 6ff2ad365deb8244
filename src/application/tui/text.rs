use super::render::NO_PHOTOS_TEXT;
use super::theme::{ColorPair, Theme};
use crate::entities::{DailyPicture, RoverPhoto};
use std::fmt::Write;

/// Plain text output for the one-shot `apod` and `rover` commands
pub struct TextRenderer {
    theme: Option<Theme>,
}

impl TextRenderer {
    /// Renderer that colours its output with `theme`
    pub fn new(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }

    /// Renderer without escape codes, for pipes and tests
    pub fn plain() -> Self {
        Self { theme: None }
    }

    fn paint(&self, pick: impl Fn(&Theme) -> &ColorPair, text: &str) -> String {
        match &self.theme {
            Some(theme) => pick(theme).colorize(text),
            None => text.to_string(),
        }
    }

    fn paint_bold(&self, pick: impl Fn(&Theme) -> &ColorPair, text: &str) -> String {
        match &self.theme {
            Some(theme) => pick(theme).colorize_bold(text),
            None => text.to_string(),
        }
    }

    pub fn render_daily_picture(&self, picture: &DailyPicture) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== {} ===", self.paint_bold(|t| &t.colors.picture_title, &picture.title));
        if let Some(date) = &picture.date {
            let _ = writeln!(out, "{}", self.paint(|t| &t.colors.dimmed, date));
        }
        if let Some(copyright) = &picture.copyright {
            let _ = writeln!(out, "{}", self.paint(|t| &t.colors.dimmed, &format!("© {}", copyright)));
        }
        let _ = writeln!(out, "\n{}", self.paint(|t| &t.colors.link, &picture.image_url));
        let _ = writeln!(out, "\n{}", picture.description);

        out
    }

    pub fn render_rover_photos(&self, rover: &str, earth_date: &str, photos: &[RoverPhoto]) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "=== {} ===",
            self.paint_bold(|t| &t.colors.header, &format!("{} on {}", rover, earth_date))
        );

        if photos.is_empty() {
            let _ = writeln!(out, "{}", self.paint(|t| &t.colors.dimmed, NO_PHOTOS_TEXT));
            return out;
        }

        for photo in photos {
            let camera = photo
                .camera
                .as_deref()
                .map(|c| format!(" ({})", c))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  • {}{} {}",
                photo.alt_text(),
                camera,
                self.paint(|t| &t.colors.link, &photo.image_url)
            );
        }

        out
    }
}
