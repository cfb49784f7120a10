#[cfg(test)]
mod core_test {
    use crate::classification_session::core::{
        init, transition, Effect, Event, Phase, SessionError, State, Status,
    };
    use crate::image_classifier::interface::{ClassifyError, SelectedImage, Verdict};

    fn image(name: &str) -> SelectedImage {
        SelectedImage::new(name, "image/jpeg", name.as_bytes().to_vec())
    }

    fn selected(name: &str) -> State {
        let (state, _) = init();
        let (state, _) = transition(state, Event::ImageSelected(image(name)));
        state
    }

    fn submitting(name: &str) -> (State, u64) {
        let (state, effects) = transition(selected(name), Event::SubmitRequested);
        match effects.as_slice() {
            [Effect::Classify { submission_id, .. }] => (state, *submission_id),
            _ => panic!("Unexpected effects: {:?}", effects),
        }
    }

    #[test]
    fn test_init() {
        let (state, effects) = init();

        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.selected_image, None);
        assert_eq!(state.result(), None);
        assert_eq!(state.error(), None);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_select_image_from_idle() {
        let state = selected("dog.jpg");

        assert_eq!(state.status(), Status::ImageSelected);
        assert_eq!(state.selected_image, Some(image("dog.jpg")));
    }

    #[test]
    fn test_select_image_replaces_previous() {
        let (state, effects) = transition(selected("dog.jpg"), Event::ImageSelected(image("cat.jpg")));

        assert_eq!(state.status(), Status::ImageSelected);
        assert_eq!(state.selected_image, Some(image("cat.jpg")));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_submit_issues_single_classify_effect() {
        let (state, effects) = transition(selected("dog.jpg"), Event::SubmitRequested);

        assert_eq!(state.status(), Status::Submitting);
        assert_eq!(
            effects,
            vec![Effect::Classify {
                submission_id: 1,
                image: image("dog.jpg"),
            }]
        );
        assert_eq!(state.next_submission_id, 2);
    }

    #[test]
    fn test_submit_without_image_is_rejected() {
        let (state, _) = init();
        assert_eq!(state.can_submit(), Err(SessionError::NoImageSelected));

        let (new_state, effects) = transition(state.clone(), Event::SubmitRequested);
        assert_eq!(new_state, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_submit_while_submitting_is_rejected() {
        let (state, _) = submitting("dog.jpg");
        assert_eq!(state.can_submit(), Err(SessionError::SubmissionInFlight));

        let (new_state, effects) = transition(state.clone(), Event::SubmitRequested);
        assert_eq!(new_state, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_success_resolves_with_verdict() {
        for (verdict, expected) in [(Verdict::Hotdog, true), (Verdict::NotHotdog, false)] {
            let (state, id) = submitting("dog.jpg");
            let (state, effects) = transition(
                state,
                Event::ClassifyDone {
                    submission_id: id,
                    result: Ok(verdict),
                },
            );

            assert_eq!(state.status(), Status::Resolved);
            assert_eq!(state.result(), Some(expected));
            assert_eq!(state.error(), None);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_failure_never_resolves() {
        let failures = vec![
            ClassifyError::Transport("connection reset".to_string()),
            ClassifyError::Server {
                status: 502,
                body: "bad gateway".to_string(),
            },
            ClassifyError::MalformedResponse("missing field `result`".to_string()),
        ];

        for error in failures {
            let (state, id) = submitting("blurry.jpg");
            let (state, _) = transition(
                state,
                Event::ClassifyDone {
                    submission_id: id,
                    result: Err(error.clone()),
                },
            );

            assert_eq!(state.status(), Status::Failed);
            assert_eq!(state.error(), Some(&error));
            assert_eq!(state.result(), None);
        }
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let (state, id) = submitting("dog.jpg");

        let (new_state, effects) = transition(
            state.clone(),
            Event::ClassifyDone {
                submission_id: id + 7,
                result: Ok(Verdict::Hotdog),
            },
        );

        assert_eq!(new_state, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_completion_outside_submitting_is_ignored() {
        let state = selected("dog.jpg");

        let (new_state, _) = transition(
            state.clone(),
            Event::ClassifyDone {
                submission_id: 1,
                result: Ok(Verdict::Hotdog),
            },
        );

        assert_eq!(new_state, state);
    }

    #[test]
    fn test_select_while_submitting_supersedes_request() {
        let (state, id) = submitting("dog.jpg");

        let (state, effects) = transition(state, Event::ImageSelected(image("hotdog.jpg")));
        assert_eq!(state.status(), Status::Submitting);
        assert_eq!(state.selected_image, Some(image("hotdog.jpg")));
        assert!(effects.is_empty());

        let (new_state, effects) = transition(state.clone(), Event::SubmitRequested);
        assert_eq!(new_state, state);
        assert!(effects.is_empty());

        let (state, _) = transition(
            state,
            Event::ClassifyDone {
                submission_id: id,
                result: Ok(Verdict::NotHotdog),
            },
        );
        assert_eq!(state.status(), Status::ImageSelected);
        assert_eq!(state.result(), None);
        assert_eq!(state.selected_image, Some(image("hotdog.jpg")));
    }

    #[test]
    fn test_select_after_resolved_clears_result() {
        let (state, id) = submitting("dog.jpg");
        let (state, _) = transition(
            state,
            Event::ClassifyDone {
                submission_id: id,
                result: Ok(Verdict::NotHotdog),
            },
        );

        let (state, _) = transition(state, Event::ImageSelected(image("hotdog.jpg")));

        assert_eq!(state.status(), Status::ImageSelected);
        assert_eq!(state.result(), None);
    }

    #[test]
    fn test_select_after_failed_clears_error() {
        let (state, id) = submitting("dog.jpg");
        let (state, _) = transition(
            state,
            Event::ClassifyDone {
                submission_id: id,
                result: Err(ClassifyError::Transport("timed out".to_string())),
            },
        );

        let (state, _) = transition(state, Event::ImageSelected(image("dog.jpg")));

        assert_eq!(state.status(), Status::ImageSelected);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_reset_returns_to_image_selected() {
        let (state, id) = submitting("dog.jpg");
        let (state, _) = transition(
            state,
            Event::ClassifyDone {
                submission_id: id,
                result: Ok(Verdict::Hotdog),
            },
        );
        assert_eq!(state.can_reset(), Ok(()));

        let (state, effects) = transition(state, Event::ResetRequested);

        assert_eq!(state.status(), Status::ImageSelected);
        assert_eq!(state.result(), None);
        assert_eq!(state.selected_image, Some(image("dog.jpg")));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_reset_without_image_returns_to_idle() {
        let (state, _) = init();
        let state = State {
            phase: Phase::Failed {
                error: ClassifyError::Transport("offline".to_string()),
            },
            ..state
        };

        let (state, _) = transition(state, Event::ResetRequested);

        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_reset_rejected_outside_resolved_or_failed() {
        let (submitting_state, _) = submitting("dog.jpg");
        let (idle_state, _) = init();

        for state in [idle_state, selected("dog.jpg"), submitting_state] {
            assert_eq!(
                state.can_reset(),
                Err(SessionError::ResetNotAllowed(state.status()))
            );

            let (new_state, effects) = transition(state.clone(), Event::ResetRequested);
            assert_eq!(new_state, state);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_retry_after_failure_uses_fresh_submission_id() {
        let (state, first_id) = submitting("blurry.jpg");
        let (state, _) = transition(
            state,
            Event::ClassifyDone {
                submission_id: first_id,
                result: Err(ClassifyError::Transport("connection dropped".to_string())),
            },
        );

        let (state, effects) = transition(state, Event::SubmitRequested);

        assert_eq!(state.status(), Status::Submitting);
        assert_eq!(
            effects,
            vec![Effect::Classify {
                submission_id: first_id + 1,
                image: image("blurry.jpg"),
            }]
        );
    }
}
