use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Headings
    pub title: ColorPair,
    pub header: ColorPair,
    pub border: ColorPair,

    // Date fields
    pub input: ColorPair,
    pub input_focused: ColorPair,

    // Content
    pub normal_text: ColorPair,
    pub picture_title: ColorPair,
    pub link: ColorPair,
    pub dimmed: ColorPair,
    pub help_text: ColorPair,
    pub loading: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(Self::crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(Self::crossterm_to_ratatui(bg));
        }
        style
    }

    /// Convert crossterm color to ratatui color
    pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
        match color {
            CrosstermColor::Black => RatatuiColor::Black,
            CrosstermColor::DarkRed => RatatuiColor::Red,
            CrosstermColor::DarkGreen => RatatuiColor::Green,
            CrosstermColor::DarkYellow => RatatuiColor::Yellow,
            CrosstermColor::DarkBlue => RatatuiColor::Blue,
            CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
            CrosstermColor::DarkCyan => RatatuiColor::Cyan,
            CrosstermColor::Grey => RatatuiColor::Gray,
            CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
            CrosstermColor::Red => RatatuiColor::LightRed,
            CrosstermColor::Green => RatatuiColor::LightGreen,
            CrosstermColor::Yellow => RatatuiColor::LightYellow,
            CrosstermColor::Blue => RatatuiColor::LightBlue,
            CrosstermColor::Magenta => RatatuiColor::LightMagenta,
            CrosstermColor::Cyan => RatatuiColor::LightCyan,
            CrosstermColor::White => RatatuiColor::White,
            CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
            CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
            _ => RatatuiColor::White,
        }
    }

    /// Convert to ratatui style with modifier
    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    /// Apply color to text for terminal output
    pub fn colorize(&self, text: &str) -> String {
        let mut styled = text.with(self.fg);
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }

    /// Apply color with bold
    pub fn colorize_bold(&self, text: &str) -> String {
        let mut styled = text.with(self.fg).bold();
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::White),
                header: ColorPair::new(CrosstermColor::DarkCyan),
                border: ColorPair::new(CrosstermColor::DarkCyan),

                input: ColorPair::new(CrosstermColor::Grey),
                input_focused: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 40, g: 40, b: 40 },
                ),

                normal_text: ColorPair::new(CrosstermColor::White),
                picture_title: ColorPair::new(CrosstermColor::Yellow),
                link: ColorPair::new(CrosstermColor::Blue),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),
                help_text: ColorPair::new(CrosstermColor::DarkCyan),
                loading: ColorPair::new(CrosstermColor::Green),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::Black),
                header: ColorPair::new(CrosstermColor::DarkBlue),
                border: ColorPair::new(CrosstermColor::DarkBlue),

                input: ColorPair::new(CrosstermColor::DarkGrey),
                input_focused: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 240, g: 240, b: 240 },
                ),

                normal_text: ColorPair::new(CrosstermColor::Black),
                picture_title: ColorPair::new(CrosstermColor::DarkMagenta),
                link: ColorPair::new(CrosstermColor::DarkBlue),
                dimmed: ColorPair::new(CrosstermColor::Grey),
                help_text: ColorPair::new(CrosstermColor::DarkBlue),
                loading: ColorPair::new(CrosstermColor::DarkGreen),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::White),
                header: ColorPair::new(CrosstermColor::White),
                border: ColorPair::new(CrosstermColor::White),

                input: ColorPair::new(CrosstermColor::Grey),
                input_focused: ColorPair::new(CrosstermColor::White),

                normal_text: ColorPair::new(CrosstermColor::White),
                picture_title: ColorPair::new(CrosstermColor::White),
                link: ColorPair::new(CrosstermColor::White),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),
                help_text: ColorPair::new(CrosstermColor::Grey),
                loading: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }
}
