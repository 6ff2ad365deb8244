use crate::application::{FetchOutcome, FetchRequest, ViewController};
use crate::infrastructure::NasaApi;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Runs fetch requests on the tokio runtime and queues their outcomes for the
/// UI thread.
///
/// Requests are never cancelled; outcomes come back in arrival order and the
/// controller decides whether they are still current.
pub struct FetchDispatcher {
    api: Arc<dyn NasaApi>,
    runtime: Handle,
    sender: UnboundedSender<FetchOutcome>,
    receiver: UnboundedReceiver<FetchOutcome>,
}

impl FetchDispatcher {
    pub fn new(api: Arc<dyn NasaApi>, runtime: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            sender,
            receiver,
        }
    }

    pub fn dispatch(&self, request: FetchRequest) {
        debug!(feature = %request.feature(), "dispatching request");
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();

        self.runtime.spawn(async move {
            let outcome = execute(api.as_ref(), request).await;
            // A closed channel means the view has already gone away
            let _ = sender.send(outcome);
        });
    }

    /// Apply every outcome that has arrived so far. Returns how many were applied.
    pub fn drain_into(&mut self, controller: &mut ViewController) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.receiver.try_recv() {
            controller.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Wait for the next outcome
    #[cfg(test)]
    pub(crate) async fn next_outcome(&mut self) -> Option<FetchOutcome> {
        self.receiver.recv().await
    }
}

/// Perform a single request against `api`
pub async fn execute(api: &dyn NasaApi, request: FetchRequest) -> FetchOutcome {
    match request {
        FetchRequest::DailyPicture { sequence, date } => FetchOutcome::DailyPicture {
            sequence,
            result: api.daily_picture(date.as_deref()).await,
        },
        FetchRequest::RoverPhotos {
            sequence,
            rover,
            earth_date,
        } => FetchOutcome::RoverPhotos {
            sequence,
            result: api.rover_photos(&rover, &earth_date).await,
        },
    }
}
