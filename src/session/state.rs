//! Annotation session state machine
//!
//! The session is a plain value. Every handler consumes it and returns a
//! [`Transition`] carrying the next session, an optional operator notice, and
//! an optional request to persist the regions of the image being left. No
//! handler touches the filesystem, so every transition can be exercised
//! without a terminal or an image on disk.

use crate::session::region::{CanvasPoint, DraftRect, Region};
use std::fmt;

/// Position of the session in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Sources not yet supplied
    AwaitingSetup,
    /// Image `index` is shown and no draft is pending
    Ready {
        /// Queue position of the current image
        index: usize,
    },
    /// Image `index` is shown and a draft follows the pointer
    Drawing {
        /// Queue position of the current image
        index: usize,
        /// The unsaved rectangle
        draft: DraftRect,
    },
    /// Queue exhausted, terminal
    Finished,
}

/// Operator actions delivered by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Sources loaded, queue holds `queue_len` images
    Setup {
        /// Number of images left after the resume filter
        queue_len: usize,
    },
    /// Pointer pressed on the canvas
    PointerDown(CanvasPoint),
    /// Pointer moved with the button held
    PointerDrag(CanvasPoint),
    /// Pointer released
    PointerUp(CanvasPoint),
    /// Label buffer replaced
    EditLabel(String),
    /// Commit the draft and label as a region
    SaveRegion,
    /// Remove the most recent region
    UndoRegion,
    /// Move on to the next image
    Advance,
}

/// Recoverable operator mistakes, reported without changing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorError {
    /// Save requested with no drawn rectangle
    NoRectangle,
    /// Save requested with an empty label
    EmptyLabel,
    /// Advance requested while a draft is pending
    UnsavedDraft,
    /// Undo requested with no regions on the image
    NothingToUndo,
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::NoRectangle => "Please draw a bounding box first!",
            Self::EmptyLabel => "Please enter text for the bounding box!",
            Self::UnsavedDraft => "Please save or remove the current box first!",
            Self::NothingToUndo => "No boxes to undo!",
        };
        f.write_str(message)
    }
}

/// Message for the operator produced by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The event was refused
    Rejected(OperatorError),
    /// Every queued image has been handled
    Complete,
}

/// Regions of a finished image that must reach disk before the next event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistRequest {
    /// Queue position of the image the regions belong to
    pub image_index: usize,
    /// Regions in save order
    pub regions: Vec<Region>,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Session after the event
    pub session: Session,
    /// Operator-facing notice, if any
    pub notice: Option<Notice>,
    /// Persistence work produced by an advance
    pub persist: Option<PersistRequest>,
}

impl Transition {
    const fn quiet(session: Session) -> Self {
        Self {
            session,
            notice: None,
            persist: None,
        }
    }

    const fn rejected(session: Session, error: OperatorError) -> Self {
        Self {
            session,
            notice: Some(Notice::Rejected(error)),
            persist: None,
        }
    }
}

/// Complete in-memory state of an annotation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
    queue_len: usize,
    regions: Vec<Region>,
    label: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session awaiting its sources
    pub const fn new() -> Self {
        Self {
            state: SessionState::AwaitingSetup,
            queue_len: 0,
            regions: Vec::new(),
            label: String::new(),
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Regions saved on the current image, in save order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Contents of the label buffer
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Queue length supplied at setup
    pub const fn queue_len(&self) -> usize {
        self.queue_len
    }

    /// Queue position of the image on the canvas
    pub const fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Ready { index } | SessionState::Drawing { index, .. } => Some(index),
            SessionState::AwaitingSetup | SessionState::Finished => None,
        }
    }

    /// Pending draft, if drawing
    pub const fn draft(&self) -> Option<&DraftRect> {
        match &self.state {
            SessionState::Drawing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// True once the queue is exhausted
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished)
    }

    /// Images after the current one
    pub fn remaining(&self) -> usize {
        self.current_index()
            .map_or(0, |index| self.queue_len.saturating_sub(index + 1))
    }

    /// Apply one operator event
    pub fn handle(self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::Setup { queue_len } => self.setup(queue_len),
            SessionEvent::PointerDown(at) => self.pointer_down(at),
            SessionEvent::PointerDrag(to) | SessionEvent::PointerUp(to) => self.pointer_move(to),
            SessionEvent::EditLabel(text) => self.edit_label(text),
            SessionEvent::SaveRegion => self.save_region(),
            SessionEvent::UndoRegion => self.undo_region(),
            SessionEvent::Advance => self.advance(),
        }
    }

    fn setup(mut self, queue_len: usize) -> Transition {
        if self.state != SessionState::AwaitingSetup {
            return Transition::quiet(self);
        }

        self.queue_len = queue_len;
        if queue_len == 0 {
            self.state = SessionState::Finished;
            return Transition {
                session: self,
                notice: Some(Notice::Complete),
                persist: None,
            };
        }

        self.state = SessionState::Ready { index: 0 };
        Transition::quiet(self)
    }

    // A fresh press discards any unsaved draft
    fn pointer_down(mut self, at: CanvasPoint) -> Transition {
        if let Some(index) = self.current_index() {
            self.state = SessionState::Drawing {
                index,
                draft: DraftRect::start(at),
            };
        }
        Transition::quiet(self)
    }

    fn pointer_move(mut self, to: CanvasPoint) -> Transition {
        if let SessionState::Drawing { index, draft } = self.state {
            self.state = SessionState::Drawing {
                index,
                draft: draft.drag_to(to),
            };
        }
        Transition::quiet(self)
    }

    fn edit_label(mut self, text: String) -> Transition {
        if self.current_index().is_some() {
            self.label = text;
        }
        Transition::quiet(self)
    }

    fn save_region(mut self) -> Transition {
        let (index, draft) = match self.state {
            SessionState::Drawing { index, draft } => (index, draft),
            SessionState::Ready { .. } => {
                return Transition::rejected(self, OperatorError::NoRectangle);
            }
            SessionState::AwaitingSetup | SessionState::Finished => {
                return Transition::quiet(self);
            }
        };

        let rect = draft.rect();
        if rect.is_degenerate() {
            return Transition::rejected(self, OperatorError::NoRectangle);
        }

        let text = self.label.trim();
        if text.is_empty() {
            return Transition::rejected(self, OperatorError::EmptyLabel);
        }

        let region = Region::new(rect.normalized(), text);
        self.regions.push(region);
        self.label.clear();
        self.state = SessionState::Ready { index };
        Transition::quiet(self)
    }

    fn undo_region(mut self) -> Transition {
        if self.current_index().is_none() {
            return Transition::quiet(self);
        }

        if self.regions.pop().is_some() {
            Transition::quiet(self)
        } else {
            Transition::rejected(self, OperatorError::NothingToUndo)
        }
    }

    fn advance(mut self) -> Transition {
        let index = match self.state {
            SessionState::Ready { index } => index,
            SessionState::Drawing { .. } => {
                return Transition::rejected(self, OperatorError::UnsavedDraft);
            }
            SessionState::AwaitingSetup | SessionState::Finished => {
                return Transition::quiet(self);
            }
        };

        let regions = std::mem::take(&mut self.regions);
        let persist = (!regions.is_empty()).then_some(PersistRequest {
            image_index: index,
            regions,
        });
        self.label.clear();

        let next = index + 1;
        let notice = if next >= self.queue_len {
            self.state = SessionState::Finished;
            Some(Notice::Complete)
        } else {
            self.state = SessionState::Ready { index: next };
            None
        };

        Transition {
            session: self,
            notice,
            persist,
        }
    }
}
