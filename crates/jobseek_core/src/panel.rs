use crate::{FilterEdit, FilterRemoval, FilterState};

/// Whether the filter panel holds an uncommitted draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Committed,
    Editing(FilterState),
}

/// Committed filters plus an optional draft.
///
/// The committed copy changes only through [`FilterPanel::commit`],
/// [`FilterPanel::toggle_facet`], [`FilterPanel::remove`] and
/// [`FilterPanel::reset`]. The last three write to the draft as well, so the
/// two copies never disagree on a field touched outside the panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPanel {
    committed: FilterState,
    phase: PanelPhase,
}

impl FilterPanel {
    pub fn committed(&self) -> &FilterState {
        &self.committed
    }

    /// The draft while editing, otherwise the committed filters.
    pub fn pending(&self) -> &FilterState {
        match &self.phase {
            PanelPhase::Editing(draft) => draft,
            PanelPhase::Committed => &self.committed,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.phase, PanelPhase::Editing(_))
    }

    /// Starts editing from the committed filters. No-op if already editing.
    pub fn open(&mut self) {
        if !self.is_editing() {
            self.phase = PanelPhase::Editing(self.committed.clone());
        }
    }

    pub fn edit(&mut self, edit: FilterEdit) {
        self.open();
        if let PanelPhase::Editing(draft) = &mut self.phase {
            draft.apply_edit(edit);
        }
    }

    /// Drops the draft. Returns false when there was nothing to drop.
    pub fn cancel(&mut self) -> bool {
        matches!(
            std::mem::take(&mut self.phase),
            PanelPhase::Editing(_)
        )
    }

    /// `Editing(draft) -> Committed`, with `draft` becoming the committed filters.
    /// Returns the previous committed filters, or `None` when not editing.
    pub fn commit(&mut self) -> Option<FilterState> {
        match std::mem::take(&mut self.phase) {
            PanelPhase::Editing(draft) => Some(std::mem::replace(&mut self.committed, draft)),
            PanelPhase::Committed => None,
        }
    }

    /// Returns true when the committed value changed.
    pub fn toggle_facet(&mut self, facet: crate::Facet, enabled: bool) -> bool {
        if let PanelPhase::Editing(draft) = &mut self.phase {
            draft.set_facet(facet, enabled);
        }
        self.committed.set_facet(facet, enabled)
    }

    /// Returns true when the committed value changed.
    pub fn remove(&mut self, removal: &FilterRemoval) -> bool {
        if let PanelPhase::Editing(draft) = &mut self.phase {
            draft.remove(removal);
        }
        self.committed.remove(removal)
    }

    pub fn reset(&mut self) {
        self.committed = FilterState::default();
        self.phase = PanelPhase::Committed;
    }
}
