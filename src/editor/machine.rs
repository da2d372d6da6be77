//! Document lifecycle and machine-level setters.

use super::EditorModel;
use crate::core::{Elements, Meta, Point, StateMachine};
use crate::store::{Change, DataPath, Document};
use std::sync::Arc;
use tracing::debug;

impl EditorModel {
    /// Replace the whole document with a fresh one seeded from `elements`.
    ///
    /// The head-scope machine is always injected (overwriting one carried in
    /// `elements`), the document is marked initialized and clean, and the
    /// platform hook runs before observers hear about the reset.
    pub fn init(&mut self, basename: Option<&str>, name: &str, elements: Elements) {
        self.data = Document::fresh(basename.map(str::to_string), name.to_string(), elements);
        debug!(
            document = name,
            machines = self.data.machine_ids.len(),
            "document initialized"
        );

        if let Some(hook) = self.platform_init.as_mut() {
            hook(&self.data.elements);
        }

        for path in [
            DataPath::Basename,
            DataPath::Name,
            DataPath::IsInitialized,
            DataPath::IsStale,
            DataPath::HeadControllerId,
            DataPath::StateMachinesId,
        ] {
            self.hub.notify(&Change::document(path), &self.data);
        }
        let machine_ids = Arc::clone(&self.data.machine_ids);
        for sm_id in machine_ids.iter() {
            for path in DataPath::ALL
                .into_iter()
                .filter(|p| p.is_elements() && *p != DataPath::StateMachinesId)
            {
                self.hub.notify(&Change::machine(path, sm_id.as_str()), &self.data);
            }
        }
    }

    /// Register machine `sm_id`. Never overwrites an existing one.
    pub fn create_state_machine(&mut self, sm_id: &str, machine: StateMachine) -> bool {
        if self.data.elements.state_machines.contains_key(sm_id) {
            return false;
        }
        self.data
            .elements
            .state_machines
            .insert(sm_id.to_string(), machine);
        self.publish(sm_id, DataPath::StateMachinesId);
        true
    }

    pub fn delete_state_machine(&mut self, sm_id: &str) -> bool {
        if self.data.elements.state_machines.remove(sm_id).is_none() {
            return false;
        }
        self.publish(sm_id, DataPath::StateMachinesId);
        true
    }

    pub fn change_head_controller_id(&mut self, id: &str) {
        self.data.head_controller_id = id.to_string();
        self.publish_document(DataPath::HeadControllerId);
    }

    /// Acknowledge a save: record where it went and mark the document clean.
    pub fn trigger_save(&mut self, basename: Option<&str>, name: Option<&str>) {
        self.data.basename = basename.map(str::to_string);
        self.data.name = Some(
            name.map(str::to_string)
                .unwrap_or_else(|| self.config.untitled_name.clone()),
        );
        self.data.is_stale = false;

        self.publish_document(DataPath::Basename);
        self.publish_document(DataPath::Name);
        self.publish_document(DataPath::IsStale);
    }

    pub fn make_stale(&mut self) {
        self.data.is_stale = true;
        self.publish_document(DataPath::IsStale);
    }

    pub fn set_meta(&mut self, sm_id: &str, meta: Meta) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        sm.meta = Arc::new(meta);
        self.publish(sm_id, DataPath::Meta);
        true
    }

    /// Switch machine `sm_id` to textual mode.
    pub fn set_text_mode(&mut self, sm_id: &str) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        sm.visual = false;
        self.publish(sm_id, DataPath::Visual);
        true
    }

    pub fn edit_state_machine(
        &mut self,
        sm_id: &str,
        name: Option<String>,
        platform: impl Into<String>,
    ) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        sm.name = name;
        sm.platform = platform.into();
        self.publish(sm_id, DataPath::MachineName);
        true
    }

    pub fn change_state_machine_position(&mut self, sm_id: &str, position: Point) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        sm.position = position;
        self.publish(sm_id, DataPath::Position);
        true
    }
}
