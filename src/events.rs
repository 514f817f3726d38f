use std::collections::BTreeMap;

use crate::render::TableBody;

/// Every user or page action the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    PageReady,
    Search,
    ClearSearch,
    OpenCreate,
    Edit(i64),
    RequestDelete(i64),
    ConfirmDelete,
    Submit,
    ShowStatistics,
    ShowLowStock,
}

/// Element key -> event. Page controls are fixed; row controls are rebuilt
/// from each rendered table body.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBindings {
    bindings: BTreeMap<String, UiEvent>,
}

const PAGE_CONTROLS: [(&str, UiEvent); 7] = [
    ("search", UiEvent::Search),
    ("clear-search", UiEvent::ClearSearch),
    ("add", UiEvent::OpenCreate),
    ("save", UiEvent::Submit),
    ("confirm-delete", UiEvent::ConfirmDelete),
    ("statistics", UiEvent::ShowStatistics),
    ("low-stock", UiEvent::ShowLowStock),
];

impl Default for EventBindings {
    fn default() -> Self {
        let bindings = PAGE_CONTROLS
            .iter()
            .map(|(key, event)| (key.to_string(), *event))
            .collect();
        Self { bindings }
    }
}

impl EventBindings {
    pub fn for_table(body: &TableBody) -> Self {
        let mut table = Self::default();
        for row in body.rows() {
            for action in &row.actions {
                table.bindings.insert(action.key.clone(), action.event);
            }
        }
        table
    }

    pub fn resolve(&self, key: &str) -> Option<UiEvent> {
        self.bindings.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
