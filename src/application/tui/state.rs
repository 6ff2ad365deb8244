use crate::application::{FetchRequest, ViewController};
use chrono::{Duration, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const DATE_FORMAT: &str = "%Y-%m-%d";
const PAGE_STEP: i16 = 5;

/// Which date field receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    DailyDate,
    RoverDate,
}

impl Focus {
    fn toggled(self) -> Self {
        match self {
            Focus::DailyDate => Focus::RoverDate,
            Focus::RoverDate => Focus::DailyDate,
        }
    }
}

/// Result of handling one key press
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Dispatch(FetchRequest),
    Quit,
}

/// Everything the explorer screen draws from
#[derive(Debug, Clone)]
pub struct ExplorerState {
    pub controller: ViewController,
    pub focus: Focus,
    pub show_help: bool,
    /// Rows of the daily picture scrolled past
    pub daily_scroll: u16,
    /// Index of the first rover photo shown
    pub rover_offset: usize,
}

impl ExplorerState {
    pub fn new(controller: ViewController) -> Self {
        Self {
            controller,
            focus: Focus::DailyDate,
            show_help: false,
            daily_scroll: 0,
            rover_offset: 0,
        }
    }

    pub fn focused_date(&self) -> &str {
        match self.focus {
            Focus::DailyDate => self.controller.daily_date(),
            Focus::RoverDate => self.controller.rover_date(),
        }
    }

    fn set_focused_date(&mut self, date: String) {
        match self.focus {
            Focus::DailyDate => self.controller.set_daily_date(date),
            Focus::RoverDate => self.controller.set_rover_date(date),
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match (key.code, key.modifiers) {
            // Exit
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => return KeyOutcome::Quit,
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return KeyOutcome::Quit,
            _ => {}
        }

        // The date fields are hidden while a request is running
        if self.controller.is_loading() {
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.toggled();
            }

            KeyCode::Enter => {
                let request = match self.focus {
                    Focus::DailyDate => {
                        self.daily_scroll = 0;
                        self.controller.submit_daily_picture()
                    }
                    Focus::RoverDate => {
                        self.rover_offset = 0;
                        self.controller.submit_rover_photos()
                    }
                };
                return KeyOutcome::Dispatch(request);
            }

            KeyCode::Backspace => {
                let mut date = self.focused_date().to_string();
                date.pop();
                self.set_focused_date(date);
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                let mut date = self.focused_date().to_string();
                date.push(c);
                self.set_focused_date(date);
            }

            // Jump to today
            KeyCode::Char('t') => {
                let today = Local::now().date_naive();
                self.set_focused_date(today.format(DATE_FORMAT).to_string());
            }

            // Step by day
            KeyCode::Char('[') => self.step_focused_date(-1),
            KeyCode::Char(']') => self.step_focused_date(1),

            // Scroll the focused section
            KeyCode::Char('j') => self.scroll_focused(1),
            KeyCode::Char('k') => self.scroll_focused(-1),
            KeyCode::PageDown => self.scroll_focused(PAGE_STEP),
            KeyCode::PageUp => self.scroll_focused(-PAGE_STEP),

            // Toggle help
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }

        KeyOutcome::Continue
    }

    /// Rover scrolling moves by whole photos and never passes the last one.
    /// The daily picture scrolls by rows; rendering clamps it to the content.
    fn scroll_focused(&mut self, delta: i16) {
        match self.focus {
            Focus::DailyDate => {
                self.daily_scroll = self.daily_scroll.saturating_add_signed(delta);
            }
            Focus::RoverDate => {
                let last = self.controller.rover_photos().len().saturating_sub(1);
                self.rover_offset = self
                    .rover_offset
                    .saturating_add_signed(isize::from(delta))
                    .min(last);
            }
        }
    }

    /// Move the focused date by `days`; text that is not a date is left alone
    fn step_focused_date(&mut self, days: i64) {
        if let Ok(date) = NaiveDate::parse_from_str(self.focused_date(), DATE_FORMAT) {
            let stepped = date + Duration::days(days);
            self.set_focused_date(stepped.format(DATE_FORMAT).to_string());
        }
    }
}
