use crate::models::groups::EmployerGroup;
use std::collections::BTreeMap;

/// Caller-owned expand/collapse state of employer groups.
///
/// Unknown employers are expanded. `merge` only records employers seen for
/// the first time, so a collapsed employer stays collapsed when the view
/// is recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionPrefs {
    states: BTreeMap<String, bool>,
}

impl ExpansionPrefs {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        Self {
            states: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.states.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_expanded(&self, employer: &str) -> bool {
        self.states.get(employer).copied().unwrap_or(true)
    }

    /// Register newly-appearing employers as expanded.
    /// Returns how many employers were added.
    pub fn merge(&mut self, groups: &[EmployerGroup]) -> usize {
        let mut added = 0;
        for g in groups {
            if !self.states.contains_key(&g.employer_name) {
                self.states.insert(g.employer_name.clone(), true);
                added += 1;
            }
        }
        added
    }

    /// Flip one employer; returns the new state.
    pub fn toggle(&mut self, employer: &str) -> bool {
        let next = !self.is_expanded(employer);
        self.states.insert(employer.to_string(), next);
        next
    }

    pub fn set(&mut self, employer: &str, expanded: bool) {
        self.states.insert(employer.to_string(), expanded);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
