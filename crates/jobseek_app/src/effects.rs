use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use jobseek_core::{
    Effect, ListingId, ListingSummary, LoadError, Msg, PageInfo, ResultPage,
};
use jobseek_engine::{EngineEvent, EngineEvents, EngineHandle, ListingsPage, WireListing};
use jobseek_logging::{seek_debug, seek_info, seek_warn};

use crate::app::Input;
use crate::notify::Notifier;

pub struct EffectRunner {
    engine: EngineHandle,
    notifier: Box<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, notifier: Box<dyn Notifier>) -> Self {
        Self { engine, notifier }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleSearch { generation, delay } => {
                    seek_debug!(
                        "ScheduleSearch generation={} delay_ms={}",
                        generation,
                        delay.as_millis()
                    );
                    self.engine.schedule_search(generation, delay);
                }
                Effect::CancelScheduledSearch => self.engine.cancel_search(),
                Effect::FetchListings { seq, query } => {
                    let params = query.to_params(Utc::now());
                    seek_info!(
                        "FetchListings seq={} page={} params={}",
                        seq,
                        query.page,
                        params.len()
                    );
                    self.engine.fetch_listings(seq, params);
                }
                Effect::FetchRecommendations { seq, limit, token } => {
                    seek_info!("FetchRecommendations seq={} limit={}", seq, limit);
                    self.engine.fetch_recommendations(seq, limit, token);
                }
                Effect::Notify(notification) => self.notifier.notify(&notification),
            }
        }
    }
}

/// Forwards engine events to the main loop as controller messages.
pub fn spawn_event_pump(events: EngineEvents, tx: mpsc::Sender<Input>) {
    thread::spawn(move || loop {
        if let Some(event) = events.try_recv() {
            if tx.send(Input::Engine(map_event(event))).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchTimerElapsed { generation } => Msg::SearchTimerElapsed { generation },
        EngineEvent::ListingsFetched { seq, result } => Msg::ListingsLoaded {
            seq,
            result: result.map(map_page).map_err(|err| {
                seek_warn!("Listings request {} failed: {}", seq, err);
                LoadError::new(err.to_string())
            }),
        },
        EngineEvent::RecommendationsFetched { seq, result } => Msg::RecommendationsLoaded {
            seq,
            result: result
                .map(|listings| listings.into_iter().map(map_listing).collect())
                .map_err(|err| {
                    seek_warn!("Recommendations request {} failed: {}", seq, err);
                    LoadError::new(err.to_string())
                }),
        },
    }
}

fn map_page(page: ListingsPage) -> ResultPage {
    let pagination = page.pagination;
    ResultPage {
        listings: page.jobs.into_iter().map(map_listing).collect(),
        page_info: PageInfo {
            page: pagination.current_page,
            total_pages: pagination.total_pages,
            total_count: pagination.total_jobs,
            has_next: pagination.has_next_page,
            has_prev: pagination.has_prev_page,
        },
    }
}

fn map_listing(listing: WireListing) -> ListingSummary {
    let (salary_min, salary_max, currency) = match listing.salary {
        Some(salary) => (
            salary.min,
            salary.max,
            salary.currency.and_then(|code| code.parse().ok()),
        ),
        None => (None, None, None),
    };
    ListingSummary {
        id: ListingId::new(listing.id),
        title: listing.title,
        company: listing.company_name,
        city: listing.city,
        remote: listing.remote,
        job_type: listing.job_type,
        salary_min,
        salary_max,
        currency,
        posted_at: listing.posted_at,
    }
}
