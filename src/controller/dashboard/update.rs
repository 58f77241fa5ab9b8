use tracing::debug;

use super::{
    messages::Msg,
    state::{DashboardState, FetchState, Notice, NoticeLevel},
};
use crate::utils::filter;

pub fn update(state: &mut DashboardState, msg: Msg) -> bool {
    match msg {
        Msg::FetchStarted { generation } => {
            if generation <= state.latest_generation {
                return false;
            }
            state.latest_generation = generation;
            state.fetch = FetchState::Loading;
            true
        }
        Msg::FetchSucceeded {
            generation,
            records,
        } => {
            if generation != state.latest_generation {
                debug!(
                    generation,
                    latest = state.latest_generation,
                    "Discarding stale fetch response"
                );
                return false;
            }
            state.records = records;
            // A fetch issued before a confirmed delete may still list the record.
            state.deleted_at.retain(|_, deleted| generation <= *deleted);
            if !state.deleted_at.is_empty() {
                state
                    .records
                    .retain(|record| !state.deleted_at.contains_key(&record.id));
            }
            state.fetch = FetchState::Loaded;
            refilter(state);
            true
        }
        Msg::FetchFailed { generation, error } => {
            if generation != state.latest_generation {
                debug!(
                    generation,
                    latest = state.latest_generation,
                    "Discarding stale fetch failure"
                );
                return false;
            }
            // Records from an earlier fetch stay put; only the view hides them.
            state.fetch = FetchState::Failed(error);
            true
        }
        Msg::FilterChanged(patch) => {
            state.criteria.merge(patch);
            refilter(state);
            true
        }
        Msg::FilterCleared => {
            state.criteria = Default::default();
            refilter(state);
            true
        }
        Msg::DeleteStarted(id) => state.pending_deletes.insert(id),
        Msg::DeleteSucceeded { id, notice } => {
            state.pending_deletes.remove(&id);
            state.records.retain(|record| record.id != id);
            state.deleted_at.insert(id, state.latest_generation);
            refilter(state);
            state.notice = Some(Notice::new(NoticeLevel::Success, notice));
            true
        }
        Msg::DeleteDeclined { id, message } => {
            state.pending_deletes.remove(&id);
            state.notice = Some(Notice::new(NoticeLevel::Warning, message));
            true
        }
        Msg::DeleteFailed { id, error } => {
            state.pending_deletes.remove(&id);
            state.notice = Some(Notice::new(NoticeLevel::Error, error.message));
            true
        }
        Msg::Detached => {
            // Bumping the generation orphans every fetch still in flight.
            state.latest_generation += 1;
            false
        }
        Msg::NoticeDismissed => state.notice.take().is_some(),
    }
}

fn refilter(state: &mut DashboardState) {
    state.filtered = filter::apply(&state.records, &state.criteria);
}
