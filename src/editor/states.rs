//! State operations.

use super::EditorModel;
use crate::core::{Dimensions, Event, Placement, Point, State};
use tracing::warn;

/// Arguments of [`EditorModel::create_state`].
#[derive(Clone, Debug, PartialEq)]
pub struct CreateStateParams {
    pub sm_id: String,
    pub id: Option<String>,
    pub name: String,
    pub placement: Placement,
    pub dimensions: Dimensions,
    pub parent_id: Option<String>,
    pub events: Vec<Event>,
    pub color: Option<String>,
}

impl CreateStateParams {
    pub fn new(
        sm_id: impl Into<String>,
        name: impl Into<String>,
        placement: impl Into<Placement>,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            sm_id: sm_id.into(),
            id: None,
            name: name.into(),
            placement: placement.into(),
            dimensions,
            parent_id: None,
            events: Vec::new(),
            color: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Treat the given point as the center of the new state.
    pub fn in_center(mut self) -> Self {
        if let Placement::TopLeft(point) = self.placement {
            self.placement = Placement::Center(point);
        }
        self
    }
}

/// Arguments of [`EditorModel::change_state`]: replaces events and color.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeStateParams {
    pub sm_id: String,
    pub id: String,
    pub events: Vec<Event>,
    pub color: Option<String>,
}

impl EditorModel {
    /// Create a state. Returns `None` if the machine or the named parent is
    /// missing.
    pub fn create_state(&mut self, params: CreateStateParams) -> Option<String> {
        if let Some(parent) = params.parent_id.as_deref() {
            if !self.contains::<State>(&params.sm_id, parent) {
                return None;
            }
        }
        let id = self.node_id(&params.sm_id, params.id)?;
        let state = State {
            name: params.name,
            position: params.placement.resolve(params.dimensions),
            dimensions: params.dimensions,
            parent_id: params.parent_id,
            color: params.color,
            selection: false,
            events: params.events,
        };
        self.insert(&params.sm_id, &id, state).then_some(id)
    }

    pub fn change_state(&mut self, params: ChangeStateParams) -> bool {
        let ChangeStateParams {
            sm_id,
            id,
            events,
            color,
        } = params;
        self.update(&sm_id, &id, |state: &mut State| {
            state.events = events;
            state.color = color;
        })
    }

    pub fn change_state_name(&mut self, sm_id: &str, id: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        self.update(sm_id, id, |state: &mut State| state.name = name)
    }

    pub fn change_state_selection(&mut self, sm_id: &str, id: &str, selection: bool) -> bool {
        self.select(sm_id, id, |_: &State| true, |state| state.selection = selection)
    }

    pub fn change_state_position(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.update(sm_id, id, |state: &mut State| state.position = position)
    }

    /// Nest `child_id` inside `parent_id`. Fails if either is missing or the
    /// link would make a state its own ancestor.
    pub fn link_state(&mut self, sm_id: &str, parent_id: &str, child_id: &str) -> bool {
        if !self.contains::<State>(sm_id, parent_id) {
            return false;
        }
        if self.is_ancestor_or_self(sm_id, child_id, parent_id) {
            warn!(sm_id, parent = parent_id, child = child_id, "state link would form a cycle");
            return false;
        }
        let parent = parent_id.to_string();
        self.update(sm_id, child_id, |state: &mut State| state.parent_id = Some(parent))
    }

    /// Clear the parent of `id`. Fails if it has none or the parent is gone.
    pub fn unlink_state(&mut self, sm_id: &str, id: &str) -> bool {
        let parent_exists = match self.entity::<State>(sm_id, id).and_then(|s| s.parent_id.as_deref()) {
            Some(parent) => self.contains::<State>(sm_id, parent),
            None => false,
        };
        if !parent_exists {
            return false;
        }
        self.update(sm_id, id, |state: &mut State| state.parent_id = None)
    }

    /// Remove a state. Children, events and transitions that reference it
    /// are left as they are.
    pub fn delete_state(&mut self, sm_id: &str, id: &str) -> bool {
        self.remove::<State>(sm_id, id)
    }

    /// Whether `ancestor` is `id` itself or on its parent chain.
    fn is_ancestor_or_self(&self, sm_id: &str, ancestor: &str, id: &str) -> bool {
        let mut current = Some(id);
        let mut hops = 0;
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            hops += 1;
            if hops > self.data.states(sm_id).map_or(0, |s| s.len()) {
                return false;
            }
            current = self
                .entity::<State>(sm_id, node)
                .and_then(|s| s.parent_id.as_deref());
        }
        false
    }
}
