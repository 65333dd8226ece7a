//! Sessions sidebar: new chat, the session list, delete and clear.

use egui::{self, RichText, ScrollArea, Vec2};
use chatdeck_types::session::SessionSummary;
use crate::theme::*;

/// What the caller should do after rendering the sessions panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    None,
    New,
    Switch(String),
    Delete(String),
    /// Reset the active session to just the greeting
    ClearActive,
}

/// Render the session list, newest first. At most one action per frame.
pub fn sessions_panel(
    ui: &mut egui::Ui,
    sessions: &[SessionSummary],
    active_id: &str,
    busy: bool,
) -> SessionAction {
    let mut action = SessionAction::None;

    egui::Frame::default()
        .fill(BG_SIDEBAR)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                let new_btn = egui::Button::new(RichText::new("+ New chat").color(TEXT_PRIMARY))
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(ui.available_width(), 28.0));
                if ui.add(new_btn).clicked() {
                    action = SessionAction::New;
                }

                ui.add_space(6.0);
                ui.separator();

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(ui.available_height() - 40.0)
                    .show(ui, |ui| {
                        for summary in sessions {
                            let is_active = summary.id == active_id;
                            ui.horizontal(|ui| {
                                let title = RichText::new(&summary.title).color(if is_active {
                                    TEXT_PRIMARY
                                } else {
                                    TEXT_SECONDARY
                                });
                                let row = ui
                                    .selectable_label(is_active, title)
                                    .on_hover_text(format!(
                                        "{} messages, created {}",
                                        summary.message_count, summary.created_at
                                    ));
                                if row.clicked() && !is_active {
                                    action = SessionAction::Switch(summary.id.clone());
                                }

                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    if ui
                                        .small_button(RichText::new("Del").color(ERROR))
                                        .on_hover_text("Delete this chat")
                                        .clicked()
                                    {
                                        action = SessionAction::Delete(summary.id.clone());
                                    }
                                });
                            });
                        }
                    });

                ui.separator();
                let clear = ui.add_enabled(!busy, egui::Button::new("Clear chat"));
                if clear.on_hover_text("Remove every message in this chat").clicked() {
                    action = SessionAction::ClearActive;
                }
            });
        });

    action
}
