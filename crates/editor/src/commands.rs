// Every keyboard-level action is expressed as an EditorCommand.
// Key bindings live in the host; TimelineEditor::execute handles each
// variant with one match arm.

/// A discrete editor action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorCommand {
    // ── Playback ─────────────────────────────────────────────────────────────
    TogglePlay,
    /// Seek by the configured small (0.1 s) or large (1 s) step.
    SeekStep { forward: bool, large: bool },
    JumpToStart,
    JumpToEnd,
    SetVolume(f32),
    /// Loop the current region, or the selection's span when no region is set.
    ToggleLoop,

    // ── Structure ────────────────────────────────────────────────────────────
    SplitAtPlayhead,
    DeleteSelected { ripple: bool },
    MergeSelected,
    DuplicateSelected,
    Paste,
    RedistributeEqual(usize),
    AddMarker,

    // ── Segment metadata ─────────────────────────────────────────────────────
    ToggleLock,
    ToggleMute,
    SetSpeed(f64),

    // ── Undo / Redo ──────────────────────────────────────────────────────────
    Undo,
    Redo,

    // ── Selection / clipboard ────────────────────────────────────────────────
    Copy,
    SelectAll,
    ClearSelection,

    // ── View ─────────────────────────────────────────────────────────────────
    ZoomIn,
    ZoomOut,
    ToggleSnap,
}

impl EditorCommand {
    /// Commands that change the timeline or its history. These are refused
    /// while a drag gesture owns the timeline.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EditorCommand::SplitAtPlayhead
                | EditorCommand::DeleteSelected { .. }
                | EditorCommand::MergeSelected
                | EditorCommand::DuplicateSelected
                | EditorCommand::Paste
                | EditorCommand::RedistributeEqual(_)
                | EditorCommand::AddMarker
                | EditorCommand::ToggleLock
                | EditorCommand::ToggleMute
                | EditorCommand::SetSpeed(_)
                | EditorCommand::Undo
                | EditorCommand::Redo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_classification() {
        assert!(EditorCommand::Undo.is_structural());
        assert!(EditorCommand::DeleteSelected { ripple: true }.is_structural());
        assert!(!EditorCommand::ZoomIn.is_structural());
        assert!(!EditorCommand::SeekStep { forward: true, large: false }.is_structural());
        assert!(!EditorCommand::Copy.is_structural());
    }
}
