//! Single in-flight request slot owned by the presentation layer.
//!
//! At most one fetch runs per slot. A trigger that arrives while a fetch is
//! outstanding is ignored rather than queued.

use parking_lot::Mutex;
use tracing::debug;

use crate::{CityQuery, FetchError, WeatherFetcher, WeatherReport};

/// What the screen currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(WeatherReport),
    Failed(FetchError),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl From<Result<WeatherReport, FetchError>> for RequestState {
    fn from(result: Result<WeatherReport, FetchError>) -> Self {
        match result {
            Ok(report) => Self::Succeeded(report),
            Err(err) => Self::Failed(err),
        }
    }
}

#[derive(Debug, Default)]
pub struct RequestSlot {
    state: Mutex<RequestState>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading()
    }

    /// Move to `Loading`, or `None` if a request is already in flight.
    pub fn try_begin(&self) -> Option<SlotGuard<'_>> {
        let mut state = self.state.lock();
        if state.is_loading() {
            return None;
        }
        *state = RequestState::Loading;

        Some(SlotGuard {
            slot: self,
            resolved: false,
        })
    }

    /// Clear a finished result back to `Idle`. Returns false while loading or already idle.
    pub fn dismiss(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            RequestState::Succeeded(_) | RequestState::Failed(_) => {
                *state = RequestState::Idle;
                true
            }
            RequestState::Idle | RequestState::Loading => false,
        }
    }

    /// Fetch `city` through this slot.
    ///
    /// Returns `None` without touching the network when another fetch holds the slot.
    pub async fn run<F>(
        &self,
        fetcher: &F,
        city: &CityQuery,
    ) -> Option<Result<WeatherReport, FetchError>>
    where
        F: WeatherFetcher + ?Sized,
    {
        let Some(guard) = self.try_begin() else {
            debug!(%city, "fetch already in flight; trigger ignored");
            return None;
        };

        let result = fetcher.fetch(city).await;
        guard.resolve(result.clone());

        Some(result)
    }
}

/// Holds the slot in `Loading` until resolved.
///
/// Dropping it unresolved (e.g. the fetch future was cancelled) puts the slot back to `Idle`.
#[derive(Debug)]
pub struct SlotGuard<'a> {
    slot: &'a RequestSlot,
    resolved: bool,
}

impl SlotGuard<'_> {
    pub fn resolve(mut self, result: Result<WeatherReport, FetchError>) {
        *self.slot.state.lock() = result.into();
        self.resolved = true;
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            *self.slot.state.lock() = RequestState::Idle;
        }
    }
}
