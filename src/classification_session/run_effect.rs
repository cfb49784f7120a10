use crate::classification_session::core::{Effect, Event};
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("effect"),
            image_classifier,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::Classify {
                submission_id,
                image,
            } => {
                let result = self.image_classifier.classify(&image);

                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Submission {} failed: {}", submission_id, e));
                }

                let done = Event::ClassifyDone {
                    submission_id,
                    result,
                };
                if self.event_sender.send(done).is_err() {
                    let _ = self.logger.info(&format!(
                        "Session is gone, discarding response for submission {}",
                        submission_id
                    ));
                }
            }
        }
    }
}
