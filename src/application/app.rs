use crate::application::{
    Config, ExplorerView, FetchDispatcher, TextRenderer, Theme, ViewController, normalize_rover,
};
use crate::entities::{DailyPicture, RoverPhoto};
use crate::infrastructure::{NasaApi, NasaClient};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

pub struct ExplorerApp {
    config: Config,
    theme: Theme,
    api: Arc<dyn NasaApi>,
    runtime: Runtime,
}

impl ExplorerApp {
    pub fn new(config: Config) -> Result<Self> {
        let client = NasaClient::new(
            config.api_base_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
        .context("Failed to create HTTP client")?;

        Self::with_api(config, Arc::new(client))
    }

    pub fn with_api(config: Config, api: Arc<dyn NasaApi>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("nasa-explorer-fetch")
            .build()
            .context("Failed to start async runtime")?;
        let theme = Theme::by_name(&config.theme);

        Ok(Self {
            config,
            theme,
            api,
            runtime,
        })
    }

    pub fn run_tui(&self) -> Result<()> {
        info!(rover = %self.config.default_rover, theme = %self.theme.name, "starting explorer");

        let dispatcher = FetchDispatcher::new(Arc::clone(&self.api), self.runtime.handle().clone());
        let controller = ViewController::new(self.config.default_rover.clone());

        let mut view = ExplorerView::new(controller, dispatcher, self.theme.clone())?;
        view.run()?;
        Ok(())
    }

    /// One-shot fetch of the daily picture; unlike the view, failures are returned
    pub fn daily_picture(&self, date: Option<&str>) -> Result<DailyPicture> {
        self.runtime
            .block_on(self.api.daily_picture(date))
            .context("Failed to fetch the Astronomy Picture of the Day")
    }

    /// One-shot fetch of rover photos, `rover` defaulting to the configured one
    pub fn rover_photos(&self, earth_date: &str, rover: Option<&str>) -> Result<Vec<RoverPhoto>> {
        let rover = self.rover_or_default(rover);
        self.runtime
            .block_on(self.api.rover_photos(&rover, earth_date))
            .with_context(|| format!("Failed to fetch {} photos for {}", rover, earth_date))
    }

    pub fn print_daily_picture(&self, date: Option<&str>) -> Result<()> {
        let picture = self.daily_picture(date)?;
        print!("{}", self.text_renderer().render_daily_picture(&picture));
        Ok(())
    }

    pub fn print_rover_photos(&self, earth_date: &str, rover: Option<&str>) -> Result<()> {
        let photos = self.rover_photos(earth_date, rover)?;
        let rover = self.rover_or_default(rover);
        print!(
            "{}",
            self.text_renderer().render_rover_photos(&rover, earth_date, &photos)
        );
        Ok(())
    }

    fn rover_or_default(&self, rover: Option<&str>) -> String {
        rover
            .map(normalize_rover)
            .unwrap_or_else(|| self.config.default_rover.clone())
    }

    fn text_renderer(&self) -> TextRenderer {
        TextRenderer::new(self.theme.clone())
    }
}
