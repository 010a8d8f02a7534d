//! Prediction window: a text box, a suggestion count and the predicted
//! next word, talking to the HTTP service through `nextword`.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use eframe::{egui, App, Frame};
use nextword::{
    ApiError, PredictClient, Prediction, Session, StartedRequest, MAX_SUGGESTIONS, PLACEHOLDER,
};
use tracing::{debug, info};

/// Completion slot shared with the worker thread: sequence token plus the
/// request outcome.
type ReplySlot = Arc<Mutex<Option<(u64, Result<Prediction, ApiError>)>>>;

#[derive(Default)]
struct PredictApp {
    session: Session,
    pending: Option<ReplySlot>,
}

impl PredictApp {
    /// Kick off a prediction on a worker thread, if the session allows one.
    fn send_prompt(&mut self, ctx: &egui::Context) {
        let Some(started) = self.session.start() else {
            return;
        };
        let slot: ReplySlot = Arc::new(Mutex::new(None));
        self.pending = Some(slot.clone());
        let thread_ctx = ctx.clone();
        thread::spawn(move || {
            let StartedRequest { seq, base, request } = started;
            let outcome =
                PredictClient::new(base).and_then(|client| client.predict(&request));
            if let Ok(mut guard) = slot.lock() {
                *guard = Some((seq, outcome));
            }
            // wake the UI so the completion is picked up promptly
            thread_ctx.request_repaint();
        });
    }

    /// Hand a delivered completion to the session. Stale ones are dropped
    /// there; either way the slot is spent.
    fn poll_pending(&mut self) {
        let delivered = match &self.pending {
            Some(slot) => slot.lock().ok().and_then(|mut guard| guard.take()),
            None => None,
        };
        if let Some((seq, outcome)) = delivered {
            self.pending = None;
            let applied = self.session.finish(seq, outcome);
            debug!(seq, applied, "prediction completion delivered");
        }
    }
}

impl App for PredictApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_pending();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Next word");
                ui.separator();
                ui.label("type a prefix, get the likely continuation");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("API base:");
                ui.text_edit_singleline(&mut self.session.api_base);
                ui.add(
                    egui::Slider::new(&mut self.session.k, 1..=MAX_SUGGESTIONS)
                        .text("suggestions"),
                );
            });

            ui.add_space(8.0);
            ui.label("Text:");
            let prompt_id = egui::Id::new("prompt");
            // consume the shortcut before the editor sees the key
            let shortcut = ctx.memory(|m| m.has_focus(prompt_id))
                && ui.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Enter));
            ui.add(
                egui::TextEdit::multiline(&mut self.session.input)
                    .id(prompt_id)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text("Once upon a"),
            );

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let trigger = ui
                    .add_enabled(!self.session.busy(), egui::Button::new("Predict"))
                    .clicked();
                if trigger || (shortcut && !self.session.busy()) {
                    self.send_prompt(ctx);
                }
                if ui.button("Reset").clicked() {
                    self.pending = None;
                    self.session.reset();
                }
                let status = self.session.status();
                if !status.text.is_empty() {
                    let color = if status.is_error {
                        egui::Color32::RED
                    } else {
                        egui::Color32::GRAY
                    };
                    ui.colored_label(color, status.text.as_str());
                }
            });

            ui.separator();
            ui.label("Next word:");
            ui.heading(self.session.next_word_display());

            ui.add_space(4.0);
            ui.label("Suggestions:");
            ui.horizontal_wrapped(|ui| {
                if self.session.suggestions().is_empty() {
                    ui.label(PLACEHOLDER);
                    return;
                }
                let mut picked: Option<String> = None;
                for word in self.session.suggestions() {
                    if ui
                        .button(word.as_str())
                        .on_hover_text("append to the text")
                        .clicked()
                    {
                        picked = Some(word.clone());
                    }
                }
                if let Some(word) = picked {
                    self.session.append_word(&word);
                    ctx.memory_mut(|m| m.request_focus(prompt_id));
                }
            });
        });

        if self.session.busy() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    init_logging();
    info!("starting next-word front end");
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Next Word",
        native_options,
        Box::new(|_| Ok(Box::new(PredictApp::default()))),
    )
}
