//! Index-addressed edits of a state's events and their actions.
//!
//! Every operation checks the state and all indices before touching the
//! document, so an out-of-range index is a plain `false`.

use super::EditorModel;
use crate::core::{Action, Event, State};

/// Points at an event of a state, or at one action of that event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventSelection {
    pub event_idx: usize,
    pub action_idx: Option<usize>,
}

impl EventSelection {
    pub fn event(event_idx: usize) -> Self {
        Self {
            event_idx,
            action_idx: None,
        }
    }

    pub fn action(event_idx: usize, action_idx: usize) -> Self {
        Self {
            event_idx,
            action_idx: Some(action_idx),
        }
    }
}

fn action_in_range(state: &State, at: EventSelection) -> bool {
    match (state.events.get(at.event_idx), at.action_idx) {
        (Some(event), Some(idx)) => idx < event.actions.len(),
        _ => false,
    }
}

impl EditorModel {
    /// Insert `event` at `event_idx`, or append it when no index is given.
    pub fn create_event(
        &mut self,
        sm_id: &str,
        state_id: &str,
        event: Event,
        event_idx: Option<usize>,
    ) -> bool {
        self.update_if(
            sm_id,
            state_id,
            |state: &State| event_idx.map_or(true, |idx| idx <= state.events.len()),
            |state| match event_idx {
                Some(idx) => state.events.insert(idx, event),
                None => state.events.push(event),
            },
        )
    }

    pub fn change_event(&mut self, sm_id: &str, state_id: &str, event_idx: usize, event: Event) -> bool {
        self.update_if(
            sm_id,
            state_id,
            |state: &State| event_idx < state.events.len(),
            |state| state.events[event_idx] = event,
        )
    }

    pub fn delete_event(&mut self, sm_id: &str, state_id: &str, event_idx: usize) -> bool {
        self.update_if(
            sm_id,
            state_id,
            |state: &State| event_idx < state.events.len(),
            |state| {
                state.events.remove(event_idx);
            },
        )
    }

    /// Insert `action` into the event at `at.event_idx`: at `at.action_idx`
    /// when given, otherwise at the end.
    pub fn create_event_action(
        &mut self,
        sm_id: &str,
        state_id: &str,
        at: EventSelection,
        action: Action,
    ) -> bool {
        self.update_if(
            sm_id,
            state_id,
            |state: &State| match (state.events.get(at.event_idx), at.action_idx) {
                (Some(event), Some(idx)) => idx <= event.actions.len(),
                (Some(_), None) => true,
                (None, _) => false,
            },
            |state| {
                let actions = &mut state.events[at.event_idx].actions;
                match at.action_idx {
                    Some(idx) => actions.insert(idx, action),
                    None => actions.push(action),
                }
            },
        )
    }

    pub fn change_event_action(
        &mut self,
        sm_id: &str,
        state_id: &str,
        at: EventSelection,
        action: Action,
    ) -> bool {
        let Some(action_idx) = at.action_idx else {
            return false;
        };
        self.update_if(
            sm_id,
            state_id,
            |state: &State| action_in_range(state, at),
            |state| state.events[at.event_idx].actions[action_idx] = action,
        )
    }

    pub fn delete_event_action(&mut self, sm_id: &str, state_id: &str, at: EventSelection) -> bool {
        let Some(action_idx) = at.action_idx else {
            return false;
        };
        self.update_if(
            sm_id,
            state_id,
            |state: &State| action_in_range(state, at),
            |state| {
                state.events[at.event_idx].actions.remove(action_idx);
            },
        )
    }

    /// Select the event at `at.event_idx`, or one of its actions when
    /// `at.action_idx` is set.
    pub fn change_event_selection(
        &mut self,
        sm_id: &str,
        state_id: &str,
        at: EventSelection,
        selection: bool,
    ) -> bool {
        self.select(
            sm_id,
            state_id,
            |state: &State| match at.action_idx {
                None => at.event_idx < state.events.len(),
                Some(_) => action_in_range(state, at),
            },
            |state| {
                let event = &mut state.events[at.event_idx];
                match at.action_idx {
                    None => event.selection = selection,
                    Some(idx) => event.actions[idx].selection = selection,
                }
            },
        )
    }
}
