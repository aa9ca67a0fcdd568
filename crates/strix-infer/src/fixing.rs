//! Fixing: reconciling a parameter's bounds into a unique best type.
//!
//! Candidates are keyed by a canonical form that ignores tuple names and
//! deep dynamic-ness, pruned by implicit-convertibility against the lower
//! and upper bounds, and reduced to the unique candidate every other
//! candidate converts to. Candidates that differ only by dynamic-ness or
//! tuple names merge instead of tying.

use indexmap::IndexMap;
use indexmap::map::Entry;
use strix_common::Diagnostic;
use strix_types::predicates::is_really_a_type;
use strix_types::{
    TypeId, candidate_key, equal_ignoring_dynamic_and_tuple_names, merge_equivalent_types,
};

use crate::engine::MethodTypeInferrer;
use crate::host::InferenceHost;

/// Direction of a bound-pruning pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PruneDirection {
    /// Lower bounds: the bound must convert to each surviving candidate.
    FromBound,
    /// Upper bounds: each surviving candidate must convert to the bound.
    ToBound,
}

impl<'a, H: InferenceHost + ?Sized> MethodTypeInferrer<'a, H> {
    /// Fix type parameter `index` from its collected bounds. Returns false
    /// when the bounds are empty, ambiguous, or admit no unique best type.
    pub(crate) fn fix(&mut self, index: usize, diagnostics: &mut Vec<Diagnostic>) -> bool {
        debug_assert!(self.is_unfixed(index));
        debug_assert!(self.has_bound(index));

        let bound_set = &self.bounds[index];
        let exact = bound_set.exact.clone();
        let lower = bound_set.lower.clone();
        let upper = bound_set.upper.clone();

        // Candidates key on the dynamic/tuple-name-insensitive form so
        // equivalent bounds collapse into one merged entry.
        let mut candidates: IndexMap<TypeId, TypeId> = IndexMap::new();
        if let Some(exact) = &exact {
            for &bound in exact {
                self.add_or_merge_candidate(&mut candidates, bound);
            }
            if candidates.len() >= 2 {
                tracing::trace!(index, "fix failed: conflicting exact bounds");
                return false;
            }
        } else {
            if let Some(lower) = &lower {
                for &bound in lower {
                    self.add_or_merge_candidate(&mut candidates, bound);
                }
            }
            if let Some(upper) = &upper {
                for &bound in upper {
                    self.add_or_merge_candidate(&mut candidates, bound);
                }
            }
        }
        if candidates.is_empty() {
            tracing::trace!(index, "fix failed: no candidates");
            return false;
        }
        let initial_keys: Vec<TypeId> = candidates.keys().copied().collect();

        // Every lower bound must convert to a candidate for it to survive;
        // every candidate must convert to every upper bound.
        if let Some(lower) = &lower {
            self.prune_candidates(
                &mut candidates,
                lower.iter().copied(),
                &initial_keys,
                PruneDirection::FromBound,
                diagnostics,
            );
        }
        if let Some(upper) = &upper {
            self.prune_candidates(
                &mut candidates,
                upper.iter().copied(),
                &initial_keys,
                PruneDirection::ToBound,
                diagnostics,
            );
        }

        // The best candidate is the one every other candidate converts to.
        let surviving: Vec<TypeId> = initial_keys
            .iter()
            .filter_map(|key| candidates.get(key).copied())
            .collect();
        let mut best: Option<TypeId> = None;
        for &candidate in &surviving {
            let dominates = surviving.iter().all(|&other| {
                other == candidate
                    || self.conversion_exists(other, candidate, diagnostics)
            });
            if !dominates {
                continue;
            }
            match best {
                None => best = Some(candidate),
                Some(current)
                    if equal_ignoring_dynamic_and_tuple_names(
                        self.types, current, candidate,
                    ) =>
                {
                    best = Some(merge_equivalent_types(self.types, current, candidate));
                }
                Some(_) => {
                    tracing::trace!(index, "fix failed: best candidate not unique");
                    return false;
                }
            }
        }
        let Some(best) = best else {
            tracing::trace!(index, "fix failed: no best candidate");
            return false;
        };

        tracing::trace!(index, "fixed");
        self.fixed_results[index] = Some(best);
        self.update_dependencies_after_fix(index);
        true
    }

    fn add_or_merge_candidate(
        &self,
        candidates: &mut IndexMap<TypeId, TypeId>,
        new_candidate: TypeId,
    ) {
        let key = candidate_key(self.types, new_candidate);
        match candidates.entry(key) {
            Entry::Occupied(mut entry) => {
                // A merged-in candidate that is itself dynamic never
                // overwrites the existing entry.
                if new_candidate == TypeId::DYNAMIC {
                    return;
                }
                let merged = merge_equivalent_types(self.types, *entry.get(), new_candidate);
                entry.insert(merged);
            }
            Entry::Vacant(entry) => {
                entry.insert(new_candidate);
            }
        }
    }

    fn prune_candidates(
        &self,
        candidates: &mut IndexMap<TypeId, TypeId>,
        bounds: impl Iterator<Item = TypeId>,
        initial_keys: &[TypeId],
        direction: PruneDirection,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for bound in bounds {
            for &key in initial_keys {
                let Some(&candidate) = candidates.get(&key) else {
                    continue;
                };
                if equal_ignoring_dynamic_and_tuple_names(self.types, bound, candidate) {
                    if bound != TypeId::DYNAMIC {
                        candidates
                            .insert(key, merge_equivalent_types(self.types, candidate, bound));
                    }
                    continue;
                }
                let (source, destination) = match direction {
                    PruneDirection::FromBound => (bound, candidate),
                    PruneDirection::ToBound => (candidate, bound),
                };
                if !self.conversion_exists(source, destination, diagnostics) {
                    candidates.shift_remove(&key);
                }
            }
        }
    }

    fn conversion_exists(
        &self,
        source: TypeId,
        destination: TypeId,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        if !is_really_a_type(self.types, source) || !is_really_a_type(self.types, destination) {
            return false;
        }
        self.host
            .implicit_conversion_exists(self.types, source, destination, diagnostics)
    }
}
