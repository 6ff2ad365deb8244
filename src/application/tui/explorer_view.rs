use super::render;
use super::state::{ExplorerState, KeyOutcome};
use super::theme::Theme;
use crate::application::{FetchDispatcher, ViewController};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEventKind, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout, stdout};
use std::time::Duration;
use tracing::info;

/// Full-screen explorer: owns the terminal while it runs
pub struct ExplorerView {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Screen state, including the view controller
    state: ExplorerState,
    /// Runs requests in the background
    dispatcher: FetchDispatcher,
    /// Theme for styling
    theme: Theme,
    /// Whether we should exit
    should_exit: bool,
}

impl ExplorerView {
    pub fn new(
        controller: ViewController,
        dispatcher: FetchDispatcher,
        theme: Theme,
    ) -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            terminal,
            state: ExplorerState::new(controller),
            dispatcher,
            theme,
            should_exit: false,
        })
    }

    /// Run the explorer loop until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        info!("explorer view started");
        let initial = self.state.controller.on_mount();
        self.dispatcher.dispatch(initial);

        while !self.should_exit {
            // Responses are applied on this thread, in arrival order
            self.dispatcher.drain_into(&mut self.state.controller);

            let state = &mut self.state;
            let theme = &self.theme;
            self.terminal
                .draw(|frame| render::draw(frame, state, theme))?;

            // Poll with a timeout so responses get drawn without a key press
            if !poll(Duration::from_millis(100))? {
                continue;
            }

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.state.handle_key(key) {
                        KeyOutcome::Continue => {}
                        KeyOutcome::Dispatch(request) => self.dispatcher.dispatch(request),
                        KeyOutcome::Quit => self.should_exit = true,
                    }
                }
                // Resize and everything else just triggers a redraw
                _ => continue,
            }
        }

        info!("explorer view closed");
        self.cleanup()
    }

    /// Explicit cleanup method
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for ExplorerView {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}
