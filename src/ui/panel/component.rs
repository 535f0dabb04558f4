// SPDX-License-Identifier: MPL-2.0
//! Public-facing facade wiring the state machine to the inference client.

use crate::application::port::{OverlaySurface, ViewportAccessor};
use crate::config::Config;
use crate::domain::ui::OpacityPercent;
use crate::infrastructure::http::InferenceClient;
use iced::{Element, Task};
use std::sync::Arc;

use super::{view, Event, Message, State};

/// The embeddable panel: owns the workflow state and the service client.
///
/// Hosts drive it like any Iced component: route [`Message`]s into
/// [`Panel::update`], render [`Panel::view`], and forward the rendering
/// engine's re-render notifications as [`Message::ViewportRendered`].
pub struct Panel {
    state: State,
    client: Arc<InferenceClient>,
}

impl Panel {
    /// Creates the panel and the startup task that fetches available models.
    pub fn new(
        client: InferenceClient,
        viewport: Box<dyn ViewportAccessor>,
        surface: Box<dyn OverlaySurface>,
        config: &Config,
    ) -> (Self, Task<Message>) {
        let client = Arc::new(client);
        let state = State::new(
            viewport,
            surface,
            OpacityPercent::new(config.heatmap_opacity_percent()),
        );

        let fetch_models = {
            let client = client.clone();
            Task::perform(
                async move { client.list_models().await },
                Message::ModelsLoaded,
            )
        };

        (Self { state, client }, fetch_models)
    }

    /// Updates the workflow and spawns a network task when one is requested.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self.state.update(message) {
            Event::None => Task::none(),
            Event::PredictionStarted { token, request } => {
                let client = self.client.clone();
                Task::perform(
                    async move { client.predict(&request).await },
                    move |outcome| Message::PredictionCompleted { token, outcome },
                )
            }
            Event::ReviewSubmissionStarted { request } => {
                let client = self.client.clone();
                Task::perform(
                    async move { client.submit_review(&request).await },
                    Message::ReviewSubmitted,
                )
            }
        }
    }

    /// Renders the panel.
    pub fn view(&self) -> Element<'_, Message> {
        view::render(&self.state)
    }

    /// Read access to the workflow state, mainly for host status surfaces.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }
}
