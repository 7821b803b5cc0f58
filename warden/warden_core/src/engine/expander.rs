//! Clause expansion.
//!
//! Expanding a clause walks its predicates left to right and, for each one,
//! visits its parents depth first in declaration order before emitting the
//! predicate itself. A predicate is emitted the first time it is reached and
//! skipped afterwards, so shared ancestors (diamonds) appear once, at the
//! position where they were first needed.
//!
//! The current DFS path is tracked alongside the emitted set. Reaching a
//! predicate that is already on the path means the declared parents form a
//! cycle, and expansion stops with [`ResolutionError::CyclicDependency`].
//!
//! The walk keeps its own stack instead of recursing, so the depth of a
//! parent chain is bounded by memory rather than by the thread's stack.

use std::collections::HashSet;

use crate::error::ResolutionError;
use crate::id::PredicateId;
use crate::model::{Clause, ResolvedClause};
use crate::registry::PredicateRegistry;

/// Expands clauses against a registry.
pub struct ClauseExpander<'r, I, C> {
    registry: &'r PredicateRegistry<I, C>,
}

/// A predicate on the current DFS path.
struct Frame {
    id: PredicateId,

    /// Index of the next parent to visit.
    next_parent: usize,
}

/// Per-clause traversal state.
#[derive(Default)]
struct Expansion {
    /// Predicates already written to the output.
    emitted: HashSet<PredicateId>,

    /// Predicates on the current DFS path.
    in_stack: HashSet<PredicateId>,

    /// The current DFS path, in order.
    path: Vec<Frame>,

    /// The evaluation sequence built so far.
    sequence: Vec<PredicateId>,
}

impl<'r, I, C> ClauseExpander<'r, I, C> {
    /// Create an expander over the given registry.
    pub fn new(registry: &'r PredicateRegistry<I, C>) -> Self {
        Self { registry }
    }

    /// Expand one clause into its evaluation sequence.
    ///
    /// # Arguments
    ///
    /// * `clause` - The clause as declared.
    ///
    /// # Returns
    ///
    /// * `Ok(ResolvedClause)` - Parents first, each predicate once.
    /// * `Err(ResolutionError)` - If a predicate is unknown to this registry or
    ///   the parents form a cycle.
    pub fn expand(&self, clause: &Clause) -> Result<ResolvedClause, ResolutionError> {
        let mut expansion = Expansion::default();

        for predicate in clause.predicates() {
            self.enter(*predicate, &mut expansion)?;
            self.descend(&mut expansion)?;
        }

        Ok(ResolvedClause::from_sequence(expansion.sequence))
    }

    /// Push `id` onto the path unless it has been emitted already.
    fn enter(&self, id: PredicateId, expansion: &mut Expansion) -> Result<(), ResolutionError> {
        // Everything below an emitted predicate has been emitted too.
        if expansion.emitted.contains(&id) {
            return Ok(());
        }

        if expansion.in_stack.contains(&id) {
            return Err(self.cycle_error(id, &expansion.path));
        }

        if !self.registry.contains(id) {
            return Err(ResolutionError::UnknownPredicate(id));
        }

        expansion.in_stack.insert(id);
        expansion.path.push(Frame { id, next_parent: 0 });
        Ok(())
    }

    /// Visit parents of the top of the path until the path is empty, emitting
    /// each predicate once all of its parents have been emitted.
    fn descend(&self, expansion: &mut Expansion) -> Result<(), ResolutionError> {
        while let Some(frame) = expansion.path.last_mut() {
            let parents = self
                .registry
                .parents(frame.id)
                .map_err(|_| ResolutionError::UnknownPredicate(frame.id))?;

            match parents.get(frame.next_parent) {
                Some(parent) => {
                    frame.next_parent += 1;
                    self.enter(*parent, expansion)?;
                }
                None => {
                    let id = frame.id;
                    expansion.path.pop();
                    expansion.in_stack.remove(&id);
                    expansion.emitted.insert(id);
                    expansion.sequence.push(id);
                }
            }
        }

        Ok(())
    }

    fn cycle_error(&self, id: PredicateId, path: &[Frame]) -> ResolutionError {
        let start = path.iter().position(|frame| frame.id == id).unwrap_or(0);
        let cycle = path[start..]
            .iter()
            .map(|frame| frame.id)
            .chain(std::iter::once(id))
            .map(|step| self.registry.name_of(step).to_string())
            .collect();

        ResolutionError::CyclicDependency { cycle }
    }
}
