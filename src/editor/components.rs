//! Component operations, including renames that follow every reference.

use super::{CreateComponentError, EditorModel};
use crate::core::{Component, Placement, Point};
use crate::store::DataPath;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Arguments of [`EditorModel::create_component`].
///
/// The id is the name actions and triggers use to refer to the component.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateComponentParams {
    pub sm_id: String,
    pub id: String,
    pub kind: String,
    pub name: Option<String>,
    pub placement: Placement,
    pub parameters: BTreeMap<String, String>,
}

impl CreateComponentParams {
    pub fn new(
        sm_id: impl Into<String>,
        id: impl Into<String>,
        kind: impl Into<String>,
        placement: impl Into<Placement>,
    ) -> Self {
        Self {
            sm_id: sm_id.into(),
            id: id.into(),
            kind: kind.into(),
            name: None,
            placement: placement.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn in_center(mut self) -> Self {
        if let Placement::TopLeft(point) = self.placement {
            self.placement = Placement::Center(point);
        }
        self
    }
}

impl EditorModel {
    /// Create a component and return its id.
    ///
    /// The id, not the display name, comes back: actions, triggers and
    /// conditions refer to components by id, and the name is only a label.
    /// A duplicate id is logged and the id handed back unchanged without
    /// touching the document. Use [`try_create_component`](Self::try_create_component)
    /// to tell the two outcomes apart.
    pub fn create_component(&mut self, params: CreateComponentParams) -> Option<String> {
        let id = params.id.clone();
        match self.try_create_component(params) {
            Ok(id) => Some(id),
            Err(CreateComponentError::DuplicateId(_)) => Some(id),
            Err(CreateComponentError::MachineNotFound(_)) => None,
        }
    }

    /// Create a component; new ones go after every existing one in order.
    pub fn try_create_component(&mut self, params: CreateComponentParams) -> Result<String, CreateComponentError> {
        let sm = self
            .data
            .machine(&params.sm_id)
            .ok_or_else(|| CreateComponentError::MachineNotFound(params.sm_id.clone()))?;
        if sm.components.contains_key(&params.id) {
            error!(
                sm_id = %params.sm_id,
                id = %params.id,
                kind = %params.kind,
                "component id already in use"
            );
            return Err(CreateComponentError::DuplicateId(params.id));
        }

        let order = sm.max_component_order().map_or(0, |max| max + 1);
        let component = Component {
            kind: params.kind,
            name: params.name,
            position: params.placement.resolve(self.config.component_dimensions()),
            parameters: params.parameters,
            order,
            selection: false,
        };
        self.insert(&params.sm_id, &params.id, component);
        Ok(params.id)
    }

    /// Replace the parameters and display name of a component.
    pub fn edit_component(
        &mut self,
        sm_id: &str,
        id: &str,
        parameters: BTreeMap<String, String>,
        name: Option<String>,
    ) -> bool {
        self.update(sm_id, id, |component: &mut Component| {
            component.parameters = parameters;
            component.name = name;
        })
    }

    /// Re-key a component and rewrite every reference to it in the machine.
    ///
    /// Fails if `id` is missing or `new_id` already names another component.
    pub fn change_component_name(&mut self, sm_id: &str, id: &str, new_id: &str) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        if !sm.components.contains_key(id) || (id != new_id && sm.components.contains_key(new_id)) {
            return false;
        }
        if id == new_id {
            return true;
        }

        let components = Arc::make_mut(&mut sm.components);
        if let Some(component) = components.remove(id) {
            components.insert(new_id.to_string(), component);
        }
        let outcome = sm.rename_component_references(id, new_id);
        debug!(
            sm_id,
            from = id,
            to = new_id,
            references = outcome.total(),
            "component renamed"
        );

        self.publish(sm_id, DataPath::Components);
        if outcome.states > 0 {
            self.publish(sm_id, DataPath::States);
        }
        if outcome.transitions > 0 {
            self.publish(sm_id, DataPath::Transitions);
        }
        true
    }

    /// Exchange the `order` of two components.
    pub fn swap_components(&mut self, sm_id: &str, first: &str, second: &str) -> bool {
        let orders = match (
            self.entity::<Component>(sm_id, first),
            self.entity::<Component>(sm_id, second),
        ) {
            (Some(a), Some(b)) => (a.order, b.order),
            _ => return false,
        };
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        let components = Arc::make_mut(&mut sm.components);
        if let Some(a) = components.get_mut(first) {
            a.order = orders.1;
        }
        if let Some(b) = components.get_mut(second) {
            b.order = orders.0;
        }
        self.publish(sm_id, DataPath::Components);
        true
    }

    pub fn change_component_position(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.update(sm_id, id, |component: &mut Component| component.position = position)
    }

    pub fn change_component_selection(&mut self, sm_id: &str, id: &str, selection: bool) -> bool {
        self.select(sm_id, id, |_: &Component| true, |c| c.selection = selection)
    }

    /// Remove a component. Actions and triggers naming it are left dangling.
    pub fn delete_component(&mut self, sm_id: &str, id: &str) -> bool {
        self.remove::<Component>(sm_id, id)
    }
}
