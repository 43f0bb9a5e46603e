use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobseek_logging::{seek_debug, seek_info};

use crate::client::{ApiSettings, ListingsApi, ReqwestListingsApi};
use crate::debounce::Debouncer;
use crate::{EngineError, EngineEvent, RequestSeq};

enum EngineCommand {
    FetchListings {
        seq: RequestSeq,
        params: Vec<(String, String)>,
    },
    FetchRecommendations {
        seq: RequestSeq,
        limit: u32,
        token: String,
    },
    ScheduleSearch {
        generation: u64,
        delay: Duration,
    },
    CancelSearch,
}

/// Command side of the engine. Cheap to clone.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Event side of the engine.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<(Self, EngineEvents), EngineError> {
        let api = ReqwestListingsApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    /// Starts the engine thread around any [`ListingsApi`] implementation.
    pub fn with_api(api: Arc<dyn ListingsApi>) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let mut debouncer = Debouncer::new(runtime.handle().clone());
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::ScheduleSearch { generation, delay } => {
                        let event_tx = event_tx.clone();
                        debouncer.schedule(delay, move || {
                            let _ = event_tx.send(EngineEvent::SearchTimerElapsed { generation });
                        });
                    }
                    EngineCommand::CancelSearch => {
                        if debouncer.cancel() {
                            seek_debug!("Cancelled pending search timer");
                        }
                    }
                    command => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_fetch(api.as_ref(), command, event_tx).await;
                        });
                    }
                }
            }
            seek_info!("Engine command channel closed; shutting down");
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn fetch_listings(&self, seq: RequestSeq, params: Vec<(String, String)>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchListings { seq, params });
    }

    pub fn fetch_recommendations(&self, seq: RequestSeq, limit: u32, token: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchRecommendations {
            seq,
            limit,
            token: token.into(),
        });
    }

    /// Arms the search timer; a later call or [`EngineHandle::cancel_search`]
    /// replaces it.
    pub fn schedule_search(&self, generation: u64, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ScheduleSearch { generation, delay });
    }

    pub fn cancel_search(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelSearch);
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_fetch(
    api: &dyn ListingsApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchListings { seq, params } => EngineEvent::ListingsFetched {
            seq,
            result: api.fetch_listings(&params).await,
        },
        EngineCommand::FetchRecommendations { seq, limit, token } => {
            EngineEvent::RecommendationsFetched {
                seq,
                result: api.fetch_recommendations(limit, &token).await,
            }
        }
        EngineCommand::ScheduleSearch { .. } | EngineCommand::CancelSearch => return,
    };
    let _ = event_tx.send(event);
}
