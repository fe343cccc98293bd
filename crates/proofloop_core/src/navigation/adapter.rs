//! Ownership-aware wrapper around the host navigation stack.
//!
//! # Responsibility
//! - Mirror the visible stack as entries tagged with their owning coordinator.
//! - Translate subtree teardown into the minimal pop/dismiss sequence.
//! - Keep a bounded history of issued commands for diagnostics and tests.
//!
//! # Invariants
//! - Every host command goes through this adapter; the mirror never drifts.
//! - Only entries owned by the coordinators being torn down are removed;
//!   foreign entries above them are restored in their original order.

use crate::coordinator::CoordinatorId;
use crate::navigation::view::{NavigationStack, Presentation, ViewUnit};
use log::{debug, warn};
use std::collections::{BTreeSet, VecDeque};

/// One unit on the mirrored stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEntry {
    pub unit: ViewUnit,
    pub owner: CoordinatorId,
    pub presentation: Presentation,
}

/// Command issued to the host stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    Push { screen: &'static str, animated: bool },
    Pop { animated: bool },
    Present { screen: &'static str, animated: bool },
    Dismiss { animated: bool },
}

pub struct NavigationAdapter {
    stack: Box<dyn NavigationStack>,
    entries: Vec<StackEntry>,
    history: VecDeque<NavCommand>,
    history_limit: usize,
}

impl NavigationAdapter {
    pub fn new(stack: Box<dyn NavigationStack>, history_limit: usize) -> Self {
        Self {
            stack,
            entries: Vec::new(),
            history: VecDeque::new(),
            history_limit: history_limit.max(1),
        }
    }

    /// Makes `unit` visible on behalf of `owner`.
    pub fn show(
        &mut self,
        owner: CoordinatorId,
        unit: ViewUnit,
        presentation: Presentation,
        animated: bool,
    ) {
        match presentation {
            Presentation::Push => {
                self.stack.push(&unit, animated);
                self.record(NavCommand::Push {
                    screen: unit.screen,
                    animated,
                });
            }
            Presentation::Modal => {
                self.stack.present(&unit, animated);
                self.record(NavCommand::Present {
                    screen: unit.screen,
                    animated,
                });
            }
        }
        self.entries.push(StackEntry {
            unit,
            owner,
            presentation,
        });
    }

    /// Removes every entry owned by `owners`, returning how many were removed.
    pub fn remove_owned(&mut self, owners: &BTreeSet<CoordinatorId>, animated: bool) -> usize {
        let Some(lowest) = self
            .entries
            .iter()
            .position(|entry| owners.contains(&entry.owner))
        else {
            return 0;
        };

        let unwound = self.entries.split_off(lowest);
        let foreign = unwound
            .iter()
            .filter(|entry| !owners.contains(&entry.owner))
            .cloned()
            .collect::<Vec<_>>();
        let removed = unwound.len() - foreign.len();

        if foreign.is_empty() {
            for (index, entry) in unwound.iter().rev().enumerate() {
                self.hide(entry.presentation, animated && index == 0);
            }
            debug!(
                "event=nav_unwind module=navigation status=ok removed={}",
                removed
            );
            return removed;
        }

        warn!(
            "event=nav_unwind module=navigation status=reordered removed={} restored={}",
            removed,
            foreign.len()
        );
        for entry in unwound.iter().rev() {
            self.hide(entry.presentation, false);
        }
        for entry in foreign {
            self.show(entry.owner, entry.unit, entry.presentation, false);
        }
        removed
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// Screens from bottom to top.
    pub fn screens(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.unit.screen).collect()
    }

    /// Whether any unit owned by `owner` is on the stack.
    pub fn is_shown(&self, owner: CoordinatorId) -> bool {
        self.entries.iter().any(|entry| entry.owner == owner)
    }

    /// Issued commands, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &NavCommand> {
        self.history.iter()
    }

    fn hide(&mut self, presentation: Presentation, animated: bool) {
        match presentation {
            Presentation::Push => {
                self.stack.pop(animated);
                self.record(NavCommand::Pop { animated });
            }
            Presentation::Modal => {
                self.stack.dismiss(animated);
                self.record(NavCommand::Dismiss { animated });
            }
        }
    }

    fn record(&mut self, command: NavCommand) {
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(command);
    }
}
