// SPDX-License-Identifier: MPL-2.0
//! Panel chrome: model selector, classification readout, heatmap controls,
//! and the review form.

use crate::domain::inference::{ModelDescriptor, SeverityClass};
use crate::domain::review::ReviewStatus;
use iced::widget::{button, container, pick_list, scrollable, slider, text, text_input};
use iced::widget::{Column, Row, Space};
use iced::{Color, Element, Length};

use super::{Message, Phase, State};

pub(super) fn render(state: &State) -> Element<'_, Message> {
    let mut content = Column::new()
        .spacing(16)
        .push(text("AI Diagnosis").size(20))
        .push(model_section(state))
        .push(classification_section(state));

    if let Some(result) = state.result() {
        if state.phase() != Phase::Predicting {
            content = content.push(confidence_section(result.confidence.percent_label()));
        }
    }

    if let Some(error) = state.last_error() {
        content = content.push(text(format!("Error: {error}")).size(13).style(text::danger));
    }
    if let Some(notice) = state.notice() {
        content = content.push(text(notice).size(13).style(text::success));
    }

    content = content.push(run_button(state));

    if state.result().is_some() {
        content = content.push(heatmap_section(state));
        content = content.push(review_section(state));
    }

    scrollable(container(content).padding(12).width(Length::Fill)).into()
}

fn model_section(state: &State) -> Element<'_, Message> {
    let picker: Element<'_, Message> = if state.models().is_empty() {
        text("Loading models...").size(13).into()
    } else {
        pick_list(
            state.models().to_vec(),
            state.selected_descriptor().cloned(),
            |model: ModelDescriptor| Message::ModelSelected(model.id),
        )
        .placeholder("Select AI model")
        .width(Length::Fill)
        .into()
    };

    Column::new()
        .spacing(4)
        .push(text("Select AI Model").size(13))
        .push(picker)
        .into()
}

fn classification_section(state: &State) -> Element<'_, Message> {
    let predicted = state.result().map(|result| result.class);

    let mut rows = Column::new().spacing(8);
    for class in SeverityClass::ALL {
        let active = predicted == Some(class);
        let color = class_color(class, active);

        let dot = container(Space::new().width(12.0).height(12.0)).style(move |_theme| container::Style {
            background: Some(color.into()),
            border: iced::border::rounded(6.0),
            ..container::Style::default()
        });

        let label = if active {
            text(class.display_name()).size(14)
        } else {
            text(class.display_name()).size(14).style(text::secondary)
        };

        rows = rows.push(Row::new().spacing(10).push(dot).push(label));
    }

    Column::new()
        .spacing(8)
        .push(text("Classification").size(14))
        .push(rows)
        .into()
}

fn confidence_section(label: String) -> Element<'static, Message> {
    Column::new()
        .spacing(4)
        .push(text("Confidence").size(14))
        .push(text(label).size(24))
        .into()
}

fn run_button(state: &State) -> Element<'_, Message> {
    let predicting = state.phase() == Phase::Predicting;
    let can_run = !matches!(state.phase(), Phase::Predicting | Phase::Submitting)
        && !state.models().is_empty();
    let label = if predicting {
        "Predicting..."
    } else {
        "Run Prediction"
    };

    button(text(label).size(16))
        .padding(10)
        .width(Length::Fill)
        .style(button::primary)
        .on_press_maybe(can_run.then_some(Message::RunPredictionPressed))
        .into()
}

fn heatmap_section(state: &State) -> Element<'_, Message> {
    let label = if state.overlay_attached() {
        "Hide Heatmap"
    } else {
        "Show Heatmap"
    };

    let mut section = Column::new().spacing(8).push(
        button(text(label).size(14))
            .padding(8)
            .width(Length::Fill)
            .style(button::secondary)
            .on_press(Message::ToggleHeatmapPressed),
    );

    if state.overlay_visible() {
        section = section
            .push(text(format!("Opacity: {:.0}%", state.opacity().value())).size(12))
            .push(slider(0.0..=100.0, state.opacity().value(), Message::OpacityChanged).step(1.0));
    }

    section.into()
}

fn review_section(state: &State) -> Element<'_, Message> {
    let mut verdicts = Row::new().spacing(8);
    for status in ReviewStatus::ALL {
        let selected = state.draft().status == Some(status);
        let style: fn(&iced::Theme, button::Status) -> button::Style = if selected {
            button::primary
        } else {
            button::secondary
        };
        verdicts = verdicts.push(
            button(text(status.display_name()).size(12))
                .padding([4, 10])
                .style(style)
                .on_press(Message::ReviewStatusSelected(status)),
        );
    }

    let comments = text_input("Reviewer comments...", &state.draft().comments)
        .on_input(Message::ReviewCommentsEdited)
        .padding(8)
        .size(13);

    let submitting = state.phase() == Phase::Submitting;
    let can_submit = state.draft().status.is_some() && !submitting;
    let submit_label = if submitting {
        "Submitting..."
    } else {
        "Submit Review"
    };

    Column::new()
        .spacing(10)
        .push(text("Doctor's Review").size(14))
        .push(verdicts)
        .push(comments)
        .push(
            button(text(submit_label).size(14))
                .padding(8)
                .width(Length::Fill)
                .style(button::primary)
                .on_press_maybe(can_submit.then_some(Message::SubmitReviewPressed)),
        )
        .into()
}

fn class_color(class: SeverityClass, active: bool) -> Color {
    let base = match class {
        SeverityClass::NonDementia => Color::from_rgb8(34, 197, 94),
        SeverityClass::VeryMildDementia => Color::from_rgb8(234, 179, 8),
        SeverityClass::MildDementia => Color::from_rgb8(249, 115, 22),
        SeverityClass::ModerateDementia => Color::from_rgb8(239, 68, 68),
    };
    if active {
        base
    } else {
        Color { a: 0.25, ..base }
    }
}
