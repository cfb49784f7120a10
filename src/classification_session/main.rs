use crate::classification_session::core::{init, transition, Effect, Event, SessionError, State};
use crate::classification_session::run_effect::RunEffect;
use crate::image_classifier::interface::{ImageClassifier, SelectedImage};
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Per-surface session. Dropping it discards any response still in flight.
pub struct ClassificationSession {
    state: State,
    logger: Arc<dyn Logger + Send + Sync>,
    run_effect: RunEffect,
    event_receiver: Receiver<Event>,
}

impl ClassificationSession {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let logger = logger.with_namespace("session");
        let (event_sender, event_receiver) = channel();
        let run_effect = RunEffect::new(logger.clone(), image_classifier, event_sender);
        let (state, effects) = init();

        let session = Self {
            state,
            logger,
            run_effect,
            event_receiver,
        };
        session.execute_effects(effects);
        session
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn select_image(&mut self, image: Option<SelectedImage>) -> Result<(), SessionError> {
        let Some(image) = image else {
            return Err(self.reject(SessionError::SelectionIgnored));
        };
        self.dispatch(Event::ImageSelected(image));
        Ok(())
    }

    pub fn submit(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.state.can_submit() {
            return Err(self.reject(e));
        }
        self.dispatch(Event::SubmitRequested);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.state.can_reset() {
            return Err(self.reject(e));
        }
        self.dispatch(Event::ResetRequested);
        Ok(())
    }

    /// Applies every completion that has arrived, without blocking.
    /// Returns how many events were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    #[cfg(test)]
    pub fn wait_for_completion(&mut self) {
        use crate::classification_session::core::Status;

        while self.state.status() == Status::Submitting {
            match self.event_receiver.recv() {
                Ok(event) => self.dispatch(event),
                Err(_) => break,
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        let _ = self.logger.info(&format!(
            "\nold state:\n\t{:?}\n\nevent:\n\t{:?}",
            self.state, event,
        ));

        let (new_state, effects) = transition(self.state.clone(), event);

        let _ = self.logger.info(&format!(
            "\nnew state:\n\t{:?}\n\neffects:\n\t{:?}",
            new_state, effects
        ));

        self.state = new_state;
        self.execute_effects(effects);
    }

    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    fn reject(&self, error: SessionError) -> SessionError {
        let _ = self.logger.info(&format!("Rejected: {}", error));
        error
    }
}

impl Drop for ClassificationSession {
    fn drop(&mut self) {
        let _ = self.logger.info("Session disposed");
    }
}
