use crate::image_classifier::interface::{ClassifyError, ImageClassifier, SelectedImage, Verdict};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

pub struct ImageClassifierFake {
    outcomes: Mutex<VecDeque<Result<Verdict, ClassifyError>>>,
    calls: AtomicUsize,
    submitted: Mutex<Vec<String>>,
    gate: Option<Mutex<Receiver<()>>>,
}

impl ImageClassifierFake {
    pub fn new(outcomes: Vec<Result<Verdict, ClassifyError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Every call blocks until the returned sender releases it.
    pub fn gated(outcomes: Vec<Result<Verdict, ClassifyError>>) -> (Self, Sender<()>) {
        let (release, gate) = channel();
        let mut fake = Self::new(outcomes);
        fake.gate = Some(Mutex::new(gate));
        (fake, release)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &SelectedImage) -> Result<Verdict, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(image.file_name.clone());

        if let Some(gate) = &self.gate {
            let _ = gate.lock().unwrap().recv();
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClassifyError::Transport("no scripted outcome".to_string())))
    }
}
