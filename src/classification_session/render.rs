use crate::classification_session::core::{State, Status};

pub const CAPTION: &str = "Never again wonder whether a picture contains a hotdog.";
pub const SELECT_LABEL: &str = "Select an image";
pub const SELECT_ANY_LABEL: &str = "Any file...";
pub const SUBMIT_LABEL: &str = "Is it a HotDog?";
pub const LOADING_LABEL: &str = "Analyzing image...";
pub const RESET_LABEL: &str = "Try again";

/// What the surface should show for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub preview: Option<String>,
    pub submit_enabled: bool,
    pub loading: bool,
    pub verdict: Option<String>,
    pub error: Option<String>,
    pub reset_visible: bool,
}

pub fn render(state: &State) -> View {
    let verdict = state.result().map(|is_hotdog| {
        if is_hotdog {
            "Hotdog!".to_string()
        } else {
            "Not hotdog".to_string()
        }
    });

    View {
        preview: state
            .selected_image
            .as_ref()
            .map(|image| image.file_name.clone()),
        submit_enabled: state.can_submit().is_ok(),
        loading: state.status() == Status::Submitting,
        verdict,
        error: state.error().map(|e| e.to_string()),
        reset_visible: state.can_reset().is_ok(),
    }
}
