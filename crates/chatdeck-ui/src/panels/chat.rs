//! Chat panel — the active session's messages, the attachment chip and the input row.

use egui::{self, Align, Color32, Layout, RichText, ScrollArea, Vec2};
use chatdeck_types::message::{Message, Role};
use chatdeck_types::session::Session;
use crate::state::{Submission, UiState};
use crate::theme::*;

const TIPS: &str = "Paste an error log or stack trace and ask what went wrong.\n\
    Drop a screenshot onto the window to attach it to your next message.\n\
    Each chat keeps its own history; start a new one for an unrelated question.";

/// A run of message text, either prose or a fenced code block
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Prose(&'a str),
    Code { lang: &'a str, body: &'a str },
}

/// Split on ``` fences. An unterminated fence runs to the end of the text.
pub fn split_code_blocks(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("```") {
        if start > 0 {
            segments.push(Segment::Prose(&rest[..start]));
        }
        let after = &rest[start + 3..];
        let (lang, body_start) = match after.find('\n') {
            Some(nl) => (after[..nl].trim(), nl + 1),
            None => (after.trim(), after.len()),
        };
        let body_and_tail = &after[body_start..];
        match body_and_tail.find("```") {
            Some(end) => {
                segments.push(Segment::Code { lang, body: body_and_tail[..end].trim_end_matches('\n') });
                rest = &body_and_tail[end + 3..];
            }
            None => {
                segments.push(Segment::Code { lang, body: body_and_tail.trim_end_matches('\n') });
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        segments.push(Segment::Prose(rest));
    }
    segments
}

/// Render the chat panel. Returns Some(submission) when the user sends.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, session: &Session) -> Option<Submission> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new(&session.title).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("Tips").clicked() {
                            state.show_tips = !state.show_tips;
                        }
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                // Messages area
                let footer = if state.pending_image.is_some() { 92.0 } else { 60.0 };
                let available_height = ui.available_height() - footer;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in &session.messages {
                            render_message(ui, message);
                            ui.add_space(4.0);
                        }

                        if state.is_busy() {
                            egui::Frame::default()
                                .fill(BG_SECONDARY)
                                .corner_radius(BUBBLE_ROUNDING)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        ui.spinner();
                                        ui.label(RichText::new("Analyzing...").color(TEXT_SECONDARY).italics());
                                    });
                                });
                        }
                    });

                ui.add_space(8.0);

                // Attachment chip
                if let Some(image) = &state.pending_image {
                    let label = image.label();
                    let mut remove = false;
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("Image: {}", label)).color(TEXT_SECONDARY).small());
                        if ui.small_button("x").on_hover_text("Remove image").clicked() {
                            remove = true;
                        }
                    });
                    if remove {
                        state.remove_image();
                    }
                }

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Ask a question, paste an error log, or drop a screenshot...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = state.can_send();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enter || send_btn.clicked() {
                        submitted = state.take_submission();
                        response.request_focus();
                    }
                });
            });
        });

    if state.show_tips {
        egui::Window::new("Tips")
            .open(&mut state.show_tips)
            .collapsible(false)
            .resizable(false)
            .show(ui.ctx(), |ui| {
                ui.label(RichText::new(TIPS).color(TEXT_PRIMARY));
            });
    }

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (label, label_color, bg) = match message.role {
        Role::User => ("You", TEXT_PRIMARY, USER_BUBBLE),
        Role::Assistant => ("Assistant", ACCENT, BG_SECONDARY),
        Role::System => ("System", TEXT_SECONDARY, BG_SURFACE),
    };

    let layout = match message.role {
        Role::User => Layout::top_down(Align::Max),
        _ => Layout::top_down(Align::Min),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.85);
                ui.label(RichText::new(label).color(label_color).strong().small());
                for segment in split_code_blocks(message.content.as_text()) {
                    match segment {
                        Segment::Prose(text) => {
                            ui.label(RichText::new(text.trim_matches('\n')).color(TEXT_PRIMARY));
                        }
                        Segment::Code { body, .. } => {
                            egui::Frame::default()
                                .fill(CODE_BG)
                                .corner_radius(PANEL_ROUNDING)
                                .inner_margin(6.0)
                                .show(ui, |ui| {
                                    ui.label(
                                        RichText::new(body)
                                            .monospace()
                                            .color(Color32::from_rgb(190, 220, 255)),
                                    );
                                });
                        }
                    }
                }
            });
    });
}
