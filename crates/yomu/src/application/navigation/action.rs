use std::fmt;

use serde::{Deserialize, Serialize};

/// Input from the front-end, e.g. `{"kind": "select", "payload": 3}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Action {
    Select(usize),
    Confirm,
    CycleLeft,
    CycleRight,
    NextChapter,
    PrevChapter,
    Bookmark,
    JumpToBookmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Select,
    Confirm,
    CycleLeft,
    CycleRight,
    NextChapter,
    PrevChapter,
    Bookmark,
    JumpToBookmark,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Select(_) => ActionKind::Select,
            Action::Confirm => ActionKind::Confirm,
            Action::CycleLeft => ActionKind::CycleLeft,
            Action::CycleRight => ActionKind::CycleRight,
            Action::NextChapter => ActionKind::NextChapter,
            Action::PrevChapter => ActionKind::PrevChapter,
            Action::Bookmark => ActionKind::Bookmark,
            Action::JumpToBookmark => ActionKind::JumpToBookmark,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Select => "select",
            ActionKind::Confirm => "confirm",
            ActionKind::CycleLeft => "cycle_left",
            ActionKind::CycleRight => "cycle_right",
            ActionKind::NextChapter => "next_chapter",
            ActionKind::PrevChapter => "prev_chapter",
            ActionKind::Bookmark => "bookmark",
            ActionKind::JumpToBookmark => "jump_to_bookmark",
        };
        write!(f, "{name}")
    }
}
