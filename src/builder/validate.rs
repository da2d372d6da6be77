//! Structural validation of machines arriving from outside the mutation API.
//!
//! The editor keeps these properties true for anything it creates. Import
//! payloads and checkpoints are checked here before they replace a document.

use crate::builder::error::BuildError;
use crate::core::{Elements, StateMachine};
use std::collections::{BTreeMap, BTreeSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<BuildError>>;

fn checks(problems: impl IntoIterator<Item = BuildError>) -> Vec<Check> {
    problems.into_iter().map(|problem| Validation::fail(problem)).collect()
}

fn duplicate_node_ids(sm: &StateMachine) -> Vec<Check> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    let ids = sm
        .states
        .keys()
        .chain(sm.initial_states.keys())
        .chain(sm.final_states.keys())
        .chain(sm.choice_states.keys())
        .chain(sm.notes.keys());
    for id in ids {
        *seen.entry(id.as_str()).or_default() += 1;
    }

    checks(
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| BuildError::DuplicateNodeId(id.to_string())),
    )
}

fn dangling_parents(sm: &StateMachine) -> Vec<Check> {
    let parents = sm
        .states
        .iter()
        .map(|(id, s)| (id, &s.parent_id))
        .chain(sm.initial_states.iter().map(|(id, s)| (id, &s.parent_id)))
        .chain(sm.final_states.iter().map(|(id, s)| (id, &s.parent_id)))
        .chain(sm.choice_states.iter().map(|(id, s)| (id, &s.parent_id)))
        .chain(sm.notes.iter().map(|(id, n)| (id, &n.parent_id)));

    checks(parents.filter_map(|(id, parent)| {
        let parent = parent.as_ref()?;
        (!sm.states.contains_key(parent)).then(|| BuildError::DanglingParent {
            id: id.clone(),
            parent: parent.clone(),
        })
    }))
}

fn parent_cycles(sm: &StateMachine) -> Vec<Check> {
    let cyclic = sm.states.keys().filter(|id| {
        let mut visited = BTreeSet::new();
        let mut current = sm.states.get(*id).and_then(|s| s.parent_id.as_ref());
        while let Some(parent) = current {
            if parent == *id {
                return true;
            }
            if !visited.insert(parent) {
                // Loops above this state are reported for their own members.
                return false;
            }
            current = sm.states.get(parent).and_then(|s| s.parent_id.as_ref());
        }
        false
    });

    checks(cyclic.map(|id| BuildError::ParentCycle(id.clone())))
}

fn unknown_endpoints(sm: &StateMachine) -> Vec<Check> {
    let nodes = sm.node_ids();
    let problems = sm.transitions.iter().flat_map(|(id, t)| {
        [&t.source_id, &t.target_id]
            .into_iter()
            .filter(|node| !nodes.contains(node.as_str()))
            .map(|node| BuildError::UnknownEndpoint {
                transition: id.clone(),
                node: node.clone(),
            })
            .collect::<Vec<_>>()
    });

    checks(problems)
}

fn duplicate_component_orders(sm: &StateMachine) -> Vec<Check> {
    let mut seen: BTreeMap<i64, usize> = BTreeMap::new();
    for component in sm.components.values() {
        *seen.entry(component.order).or_default() += 1;
    }

    checks(
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(order, _)| BuildError::DuplicateComponentOrder(order)),
    )
}

/// Run every structural check, accumulating all problems.
pub fn validate_machine(sm: &StateMachine) -> Validation<(), NonEmptyVec<BuildError>> {
    let mut all = duplicate_node_ids(sm);
    all.extend(dangling_parents(sm));
    all.extend(parent_cycles(sm));
    all.extend(unknown_endpoints(sm));
    all.extend(duplicate_component_orders(sm));

    Validation::all_vec(all).map(|_| ())
}

/// Every problem with `sm`, in check order; empty when it is well formed.
pub fn machine_problems(sm: &StateMachine) -> Vec<BuildError> {
    match validate_machine(sm) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

/// Check a whole payload, reporting the first problem tagged with its machine.
pub fn validate_elements(elements: &Elements) -> Result<(), BuildError> {
    for (sm_id, sm) in &elements.state_machines {
        if let Some(problem) = machine_problems(sm).into_iter().next() {
            return Err(problem.in_machine(sm_id.as_str()));
        }
    }
    Ok(())
}
