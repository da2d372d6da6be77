//! Collision-free identifier generation.
//!
//! Generators only look at the ids they are handed; they never touch the
//! document. Each call site passes the scope it cares about (graph nodes,
//! transitions) so scopes are not shared.

use std::collections::BTreeSet;
use uuid::Uuid;

/// Produces an id that is not a member of `in_use`.
pub trait IdGenerator: Send {
    fn generate(&mut self, in_use: &BTreeSet<&str>) -> String;
}

/// Random UUID v4 ids in their simple (dash-free) form.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&mut self, in_use: &BTreeSet<&str>) -> String {
        loop {
            let candidate = Uuid::new_v4().simple().to_string();
            if !in_use.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }
}

/// `prefix1`, `prefix2`, ... skipping anything already taken.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self, in_use: &BTreeSet<&str>) -> String {
        loop {
            let candidate = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if !in_use.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }
}

/// Strategy selector used by [`EditorConfig`](crate::editor::EditorConfig).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum IdStrategy {
    #[default]
    Random,
    Sequential(String),
}

impl IdStrategy {
    pub fn build(&self) -> Box<dyn IdGenerator> {
        match self {
            Self::Random => Box::new(RandomIds),
            Self::Sequential(prefix) => Box::new(SequentialIds::new(prefix.clone())),
        }
    }
}
