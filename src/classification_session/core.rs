use crate::image_classifier::interface::{ClassifyError, SelectedImage, Verdict};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    ImageSelected,
    Submitting,
    Resolved,
    Failed,
}

/// The verdict and failure live inside their phases so neither can outlast
/// the status they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    ImageSelected,
    Submitting {
        submission_id: u64,
        // A newer image was picked while this request was pending; its
        // response is dropped when it lands.
        superseded: bool,
    },
    Resolved {
        verdict: Verdict,
    },
    Failed {
        error: ClassifyError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub selected_image: Option<SelectedImage>,
    pub phase: Phase,
    pub next_submission_id: u64,
}

impl State {
    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Idle => Status::Idle,
            Phase::ImageSelected => Status::ImageSelected,
            Phase::Submitting { .. } => Status::Submitting,
            Phase::Resolved { .. } => Status::Resolved,
            Phase::Failed { .. } => Status::Failed,
        }
    }

    pub fn result(&self) -> Option<bool> {
        match &self.phase {
            Phase::Resolved { verdict } => Some(verdict.is_hotdog()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClassifyError> {
        match &self.phase {
            Phase::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> Result<(), SessionError> {
        if matches!(self.phase, Phase::Submitting { .. }) {
            return Err(SessionError::SubmissionInFlight);
        }
        if self.selected_image.is_none() {
            return Err(SessionError::NoImageSelected);
        }
        Ok(())
    }

    pub fn can_reset(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Resolved { .. } | Phase::Failed { .. } => Ok(()),
            _ => Err(SessionError::ResetNotAllowed(self.status())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no file was selected")]
    SelectionIgnored,

    #[error("select an image before submitting")]
    NoImageSelected,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("reset is not available while {0:?}")]
    ResetNotAllowed(Status),
}

#[derive(Debug)]
pub enum Event {
    ImageSelected(SelectedImage),
    SubmitRequested,
    ResetRequested,
    ClassifyDone {
        submission_id: u64,
        result: Result<Verdict, ClassifyError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Classify {
        submission_id: u64,
        image: SelectedImage,
    },
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State {
            selected_image: None,
            phase: Phase::Idle,
            next_submission_id: 1,
        },
        vec![],
    )
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state.phase.clone(), event) {
        // Selection
        (Phase::Submitting { submission_id, .. }, Event::ImageSelected(image)) => (
            State {
                selected_image: Some(image),
                phase: Phase::Submitting {
                    submission_id,
                    superseded: true,
                },
                ..state
            },
            vec![],
        ),
        (_, Event::ImageSelected(image)) => (
            State {
                selected_image: Some(image),
                phase: Phase::ImageSelected,
                ..state
            },
            vec![],
        ),

        // Submission
        (
            Phase::ImageSelected | Phase::Resolved { .. } | Phase::Failed { .. },
            Event::SubmitRequested,
        ) => match state.selected_image.clone() {
            Some(image) => {
                let submission_id = state.next_submission_id;
                (
                    State {
                        phase: Phase::Submitting {
                            submission_id,
                            superseded: false,
                        },
                        next_submission_id: submission_id + 1,
                        ..state
                    },
                    vec![Effect::Classify {
                        submission_id,
                        image,
                    }],
                )
            }
            None => (state, vec![]),
        },
        (
            Phase::Submitting {
                submission_id,
                superseded,
            },
            Event::ClassifyDone {
                submission_id: done_id,
                result,
            },
        ) if submission_id == done_id => {
            let phase = match (superseded, result) {
                (true, _) => Phase::ImageSelected,
                (false, Ok(verdict)) => Phase::Resolved { verdict },
                (false, Err(error)) => Phase::Failed { error },
            };
            (State { phase, ..state }, vec![])
        }

        // Reset
        (Phase::Resolved { .. } | Phase::Failed { .. }, Event::ResetRequested) => {
            let phase = if state.selected_image.is_some() {
                Phase::ImageSelected
            } else {
                Phase::Idle
            };
            (State { phase, ..state }, vec![])
        }

        // Default case
        _ => (state, vec![]),
    }
}
