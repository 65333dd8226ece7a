//! Main egui application — composes the panels and drives the chat runtime.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chatdeck_core::event_bus::EventBus;
use chatdeck_core::runtime::ChatRuntime;
use chatdeck_core::store::SessionStore;
use chatdeck_platform::storage::open_storage;
use chatdeck_platform::GatewayClient;
use chatdeck_types::config::StoreConfig;
use chatdeck_types::event::ChatEvent;
use chatdeck_types::{ChatError, Result};
use chatdeck_ui::image::PendingImage;
use chatdeck_ui::panels::sessions::SessionAction;
use chatdeck_ui::panels::{chat, sessions};
use chatdeck_ui::state::{Submission, UiState};
use chatdeck_ui::theme;

/// The main application state
pub struct ChatDeckApp {
    ui_state: UiState,
    event_bus: EventBus,
    /// Filled in once the session store has loaded
    runtime: Rc<RefCell<Option<ChatRuntime>>>,
    first_frame: bool,
}

impl ChatDeckApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = StoreConfig::default();
        let event_bus = EventBus::new();
        let runtime = Rc::new(RefCell::new(None));

        Self::load_store(config, event_bus.clone(), runtime.clone(), cc.egui_ctx.clone());

        Self {
            ui_state: UiState::new(),
            event_bus,
            runtime,
            first_frame: true,
        }
    }

    /// Open storage, load sessions and build the runtime (async)
    fn load_store(
        config: StoreConfig,
        event_bus: EventBus,
        slot: Rc<RefCell<Option<ChatRuntime>>>,
        ctx: egui::Context,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            let storage = open_storage(&config.storage);
            let client = Rc::new(GatewayClient::new(&config.gateway_base));
            match SessionStore::load(storage, config, event_bus.clone()).await {
                Ok(store) => {
                    log::info!("Loaded {} chat session(s)", store.sessions().len());
                    let runtime = ChatRuntime::new(Rc::new(RefCell::new(store)), client, event_bus);
                    *slot.borrow_mut() = Some(runtime);
                }
                Err(e) => {
                    log::error!("Session store failed to load: {}", e);
                    event_bus.emit(ChatEvent::Error {
                        message: e.to_string(),
                    });
                }
            }
            ctx.request_repaint();
        });
    }

    fn collect_dropped_images(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        // one image per message; the last file dropped wins
        for file in dropped {
            let Some(bytes) = file.bytes.as_deref() else {
                log::warn!("Dropped file {} has no contents", file.name);
                continue;
            };
            match PendingImage::from_bytes(&file.name, Some(&file.mime), bytes) {
                Ok(image) => self.ui_state.attach_image(image),
                Err(e) => self.ui_state.status_text = e.to_string(),
            }
        }
    }
}

impl eframe::App for ChatDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the store and runtime
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        self.collect_dropped_images(ctx);

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("chatdeck").strong().color(theme::ACCENT).size(16.0));
                ui.separator();
                ui.label(
                    RichText::new("Coding • Debugging • Vision")
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
            });
        });

        let runtime = self.runtime.borrow().clone();
        let Some(runtime) = runtime else {
            CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            });
            return;
        };

        // A spawned store operation may still hold the store; try next frame.
        let snapshot = runtime.store().try_borrow().ok().and_then(|store| {
            let active = store.active_session().cloned()?;
            Some((store.summaries(), active))
        });
        let Some((summaries, active)) = snapshot else {
            ctx.request_repaint();
            return;
        };

        // ── Sessions side panel ──────────────────────────────
        let mut action = SessionAction::None;
        SidePanel::left("sessions_panel")
            .min_width(200.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                action = sessions::sessions_panel(ui, &summaries, &active.id, self.ui_state.is_busy());
            });

        // ── Chat ─────────────────────────────────────────────
        let mut submission = None;
        CentralPanel::default().show(ctx, |ui| {
            submission = chat::chat_panel(ui, &mut self.ui_state, &active);
        });

        if action != SessionAction::None {
            self.dispatch_action(runtime.clone(), action, ctx);
        }
        if let Some(submission) = submission {
            self.dispatch_message(runtime, active.id.clone(), submission, ctx);
        }
    }
}

impl ChatDeckApp {
    /// Send one turn for `session_id` (async). The reply lands in that
    /// session even if another one is active by then.
    fn dispatch_message(
        &self,
        runtime: ChatRuntime,
        session_id: String,
        submission: Submission,
        ctx: &egui::Context,
    ) {
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();
        let image = submission.image.map(|i| i.data_url);

        wasm_bindgen_futures::spawn_local(async move {
            match runtime.run_turn(&session_id, &submission.text, image).await {
                Ok(_) => {}
                Err(ChatError::Busy) => {
                    event_bus.emit(ChatEvent::Error {
                        message: ChatError::Busy.to_string(),
                    });
                }
                // already reported on the bus by the runtime
                Err(_) => {}
            }
            ctx.request_repaint();
        });
    }

    /// Carry out a sessions-panel action against the store (async)
    fn dispatch_action(&self, runtime: ChatRuntime, action: SessionAction, ctx: &egui::Context) {
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = apply_action(&runtime, action).await {
                log::error!("Session action failed: {}", e);
                event_bus.emit(ChatEvent::Error {
                    message: e.to_string(),
                });
            }
            ctx.request_repaint();
        });
    }
}

async fn apply_action(runtime: &ChatRuntime, action: SessionAction) -> Result<()> {
    let cell = runtime.store().clone();
    let mut store = cell
        .try_borrow_mut()
        .map_err(|_| ChatError::Other("session store is in use, try again".to_string()))?;
    match action {
        SessionAction::None => {}
        SessionAction::New => {
            store.create_session().await?;
        }
        SessionAction::Switch(id) => store.switch_session(&id).await?,
        SessionAction::Delete(id) => {
            store.delete_session(&id).await?;
        }
        SessionAction::ClearActive => {
            let id = store.active_id().to_string();
            store.clear_session(&id).await?;
        }
    }
    Ok(())
}
