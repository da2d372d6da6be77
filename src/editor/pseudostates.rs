//! Initial, final and choice state operations.
//!
//! The three pseudostate kinds share one implementation; the public methods
//! only pick the map.

use super::{EditorModel, Stored};
use crate::core::{ChoiceState, FinalState, InitialState, Placement, Point, State};

/// Arguments of the `create_*_state` pseudostate operations.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatePseudostateParams {
    pub sm_id: String,
    pub id: Option<String>,
    pub placement: Placement,
    pub parent_id: Option<String>,
}

impl CreatePseudostateParams {
    pub fn new(sm_id: impl Into<String>, placement: impl Into<Placement>) -> Self {
        Self {
            sm_id: sm_id.into(),
            id: None,
            placement: placement.into(),
            parent_id: None,
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

    pub fn in_center(mut self) -> Self {
        if let Placement::TopLeft(point) = self.placement {
            self.placement = Placement::Center(point);
        }
        self
    }
}

trait Pseudostate: Stored {
    fn place(position: Point, parent_id: Option<String>) -> Self;
    fn position_mut(&mut self) -> &mut Point;
    fn parent_id(&self) -> Option<&str>;
    fn parent_id_mut(&mut self) -> &mut Option<String>;
}

macro_rules! pseudostate {
    ($ty:ty { $($extra:ident: $value:expr),* }) => {
        impl Pseudostate for $ty {
            fn place(position: Point, parent_id: Option<String>) -> Self {
                Self {
                    position,
                    parent_id,
                    $($extra: $value,)*
                }
            }

            fn position_mut(&mut self) -> &mut Point {
                &mut self.position
            }

            fn parent_id(&self) -> Option<&str> {
                self.parent_id.as_deref()
            }

            fn parent_id_mut(&mut self) -> &mut Option<String> {
                &mut self.parent_id
            }
        }
    };
}

pseudostate!(InitialState {});
pseudostate!(FinalState { selection: false });
pseudostate!(ChoiceState { selection: false });

impl EditorModel {
    fn create_pseudostate<T: Pseudostate>(&mut self, params: CreatePseudostateParams) -> Option<String> {
        if let Some(parent) = params.parent_id.as_deref() {
            if !self.contains::<State>(&params.sm_id, parent) {
                return None;
            }
        }
        let id = self.node_id(&params.sm_id, params.id)?;
        let position = params.placement.resolve(self.config.pseudostate_dimensions());
        let entity = T::place(position, params.parent_id);
        self.insert(&params.sm_id, &id, entity).then_some(id)
    }

    fn move_pseudostate<T: Pseudostate>(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.update(sm_id, id, |entity: &mut T| *entity.position_mut() = position)
    }

    fn link_pseudostate<T: Pseudostate>(&mut self, sm_id: &str, parent_id: &str, id: &str) -> bool {
        if !self.contains::<State>(sm_id, parent_id) {
            return false;
        }
        let parent = parent_id.to_string();
        self.update(sm_id, id, |entity: &mut T| *entity.parent_id_mut() = Some(parent))
    }

    fn unlink_pseudostate<T: Pseudostate>(&mut self, sm_id: &str, id: &str) -> bool {
        let parent_exists = match self.entity::<T>(sm_id, id).and_then(|e| e.parent_id()) {
            Some(parent) => self.contains::<State>(sm_id, parent),
            None => false,
        };
        if !parent_exists {
            return false;
        }
        self.update(sm_id, id, |entity: &mut T| *entity.parent_id_mut() = None)
    }

    pub fn create_initial_state(&mut self, params: CreatePseudostateParams) -> Option<String> {
        self.create_pseudostate::<InitialState>(params)
    }

    pub fn delete_initial_state(&mut self, sm_id: &str, id: &str) -> bool {
        self.remove::<InitialState>(sm_id, id)
    }

    pub fn change_initial_state_position(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.move_pseudostate::<InitialState>(sm_id, id, position)
    }

    pub fn link_initial_state(&mut self, sm_id: &str, parent_id: &str, id: &str) -> bool {
        self.link_pseudostate::<InitialState>(sm_id, parent_id, id)
    }

    pub fn unlink_initial_state(&mut self, sm_id: &str, id: &str) -> bool {
        self.unlink_pseudostate::<InitialState>(sm_id, id)
    }

    pub fn create_final_state(&mut self, params: CreatePseudostateParams) -> Option<String> {
        self.create_pseudostate::<FinalState>(params)
    }

    pub fn delete_final_state(&mut self, sm_id: &str, id: &str) -> bool {
        self.remove::<FinalState>(sm_id, id)
    }

    pub fn change_final_state_position(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.move_pseudostate::<FinalState>(sm_id, id, position)
    }

    pub fn link_final_state(&mut self, sm_id: &str, parent_id: &str, id: &str) -> bool {
        self.link_pseudostate::<FinalState>(sm_id, parent_id, id)
    }

    pub fn unlink_final_state(&mut self, sm_id: &str, id: &str) -> bool {
        self.unlink_pseudostate::<FinalState>(sm_id, id)
    }

    pub fn change_final_state_selection(&mut self, sm_id: &str, id: &str, selection: bool) -> bool {
        self.select(sm_id, id, |_: &FinalState| true, |s| s.selection = selection)
    }

    pub fn create_choice_state(&mut self, params: CreatePseudostateParams) -> Option<String> {
        self.create_pseudostate::<ChoiceState>(params)
    }

    pub fn delete_choice_state(&mut self, sm_id: &str, id: &str) -> bool {
        self.remove::<ChoiceState>(sm_id, id)
    }

    pub fn change_choice_state_position(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.move_pseudostate::<ChoiceState>(sm_id, id, position)
    }

    pub fn link_choice_state(&mut self, sm_id: &str, parent_id: &str, id: &str) -> bool {
        self.link_pseudostate::<ChoiceState>(sm_id, parent_id, id)
    }

    pub fn unlink_choice_state(&mut self, sm_id: &str, id: &str) -> bool {
        self.unlink_pseudostate::<ChoiceState>(sm_id, id)
    }

    pub fn change_choice_state_selection(&mut self, sm_id: &str, id: &str, selection: bool) -> bool {
        self.select(sm_id, id, |_: &ChoiceState| true, |s| s.selection = selection)
    }
}
