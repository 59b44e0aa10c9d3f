use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry in a product's shipment timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingStep {
    pub status: String,
    /// Free-form date; `YYYY-MM-DD` by convention, never validated.
    pub date: String,
    pub loc: String,
    #[serde(default)]
    pub completed: bool,
}

impl TrackingStep {
    pub fn new(
        status: impl Into<String>,
        date: impl Into<String>,
        loc: impl Into<String>,
        completed: bool,
    ) -> Self {
        Self {
            status: status.into(),
            date: date.into(),
            loc: loc.into(),
            completed,
        }
    }

    /// Default step appended by the editor.
    pub fn new_step(today: NaiveDate) -> Self {
        Self::new("New Step", today.format("%Y-%m-%d").to_string(), "Location", false)
    }

    /// Display-only row shown when a product has no history yet.
    pub fn no_tracking_info() -> Self {
        Self::new("No Tracking Info", "-", "-", false)
    }

    /// Coarse classification of the free-text status, used to pick an icon.
    pub fn kind(&self) -> StepKind {
        StepKind::classify(&self.status)
    }
}

/// Body of `PUT /api/products/{id}/tracking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub tracking_history: Vec<TrackingStep>,
}

/// Response of a successful tracking update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingUpdated {
    pub status: String,
    pub tracking_history: Vec<TrackingStep>,
}

impl TrackingUpdated {
    pub fn success(tracking_history: Vec<TrackingStep>) -> Self {
        Self {
            status: "success".into(),
            tracking_history,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Manufactured,
    Inspected,
    InTransit,
    Delivered,
    Other,
}

impl StepKind {
    pub fn classify(status: &str) -> Self {
        let s = status.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| s.contains(*w));
        if has(&["manufacture"]) {
            StepKind::Manufactured
        } else if has(&["quality", "check"]) {
            StepKind::Inspected
        } else if has(&["transit", "ship", "dispatch"]) {
            StepKind::InTransit
        } else if has(&["deliver", "arrived", "received"]) {
            StepKind::Delivered
        } else {
            StepKind::Other
        }
    }
}

/// Steps to render on a timeline: the history itself, or a single
/// placeholder row when it is empty.
pub fn timeline_steps(history: &[TrackingStep]) -> Vec<TrackingStep> {
    if history.is_empty() {
        vec![TrackingStep::no_tracking_info()]
    } else {
        history.to_vec()
    }
}

/// Index of the step currently in progress: the first incomplete step that is
/// either first or preceded by a completed one.
pub fn current_step(history: &[TrackingStep]) -> Option<usize> {
    history
        .iter()
        .enumerate()
        .find(|(idx, step)| !step.completed && (*idx == 0 || history[idx - 1].completed))
        .map(|(idx, _)| idx)
}

/// Editable field of a [`TrackingStep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepField {
    Status(String),
    Date(String),
    Loc(String),
    Completed(bool),
}

/// Local edit session over a product's tracking history.
///
/// The saved history is what the service last confirmed. While editing, all
/// changes go to a draft; discarding reverts to the saved history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingEditor {
    saved: Vec<TrackingStep>,
    draft: Option<Vec<TrackingStep>>,
}

impl TrackingEditor {
    pub fn new(saved: Vec<TrackingStep>) -> Self {
        Self { saved, draft: None }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn saved(&self) -> &[TrackingStep] {
        &self.saved
    }

    /// Steps to display: the draft while editing, otherwise the saved history.
    pub fn steps(&self) -> &[TrackingStep] {
        self.draft.as_deref().unwrap_or(&self.saved)
    }

    /// Enter edit mode with a copy of the saved history. No-op if already editing.
    pub fn begin(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    /// Leave edit mode, dropping unsaved changes.
    pub fn discard(&mut self) {
        self.draft = None;
    }

    /// Apply one field edit to the step at `index`. Out-of-range indices and
    /// edits outside edit mode are ignored.
    pub fn edit(&mut self, index: usize, field: StepField) {
        let Some(step) = self.draft.as_mut().and_then(|d| d.get_mut(index)) else {
            return;
        };
        match field {
            StepField::Status(v) => step.status = v,
            StepField::Date(v) => step.date = v,
            StepField::Loc(v) => step.loc = v,
            StepField::Completed(v) => step.completed = v,
        }
    }

    pub fn append(&mut self, today: NaiveDate) {
        if let Some(draft) = self.draft.as_mut() {
            draft.push(TrackingStep::new_step(today));
        }
    }

    pub fn remove(&mut self, index: usize) {
        if let Some(draft) = self.draft.as_mut() {
            if index < draft.len() {
                draft.remove(index);
            }
        }
    }

    /// The full draft to send on save, if editing.
    pub fn pending(&self) -> Option<&[TrackingStep]> {
        self.draft.as_deref()
    }

    /// Record a confirmed save of `sent`.
    ///
    /// Leaves edit mode only if the draft still equals what was sent; edits
    /// made while the save was in flight stay open on top of the new history.
    pub fn commit(&mut self, sent: &[TrackingStep], confirmed: Vec<TrackingStep>) {
        self.saved = confirmed;
        if self.draft.as_deref() == Some(sent) {
            self.draft = None;
        }
    }
}
