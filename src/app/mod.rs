use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use radial_strategy::config::EngineConfig;
use radial_strategy::engine::{
    ContourAnimator, InlineEdit, PointerSession, RevealRequest, RingFrame,
};
use radial_strategy::strategy::{StrategyDocument, load_document};
use tracing::info;

mod graph;
mod render_utils;
mod ui;

type LoadResult = Result<StrategyDocument, String>;

pub struct RadialStrategyApp {
    document_path: Option<PathBuf>,
    config: EngineConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    document: StrategyDocument,
    frame: RingFrame,
    config: EngineConfig,
    search: String,
    search_matches: HashSet<String>,
    selected: Option<String>,
    expanded_axes: HashSet<String>,
    reveal: Option<RevealRequest>,
    pointer: PointerSession,
    animator: ContourAnimator,
    inline_edit: Option<InlineEdit>,
    inline_edit_focused: bool,
}

impl RadialStrategyApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        document_path: Option<PathBuf>,
        config: EngineConfig,
    ) -> Self {
        let state = Self::start_load(document_path.clone());
        Self {
            document_path,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(document_path: Option<PathBuf>) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = match document_path {
                Some(path) => load_document(&path).map_err(|error| format!("{error:#}")),
                None => {
                    info!("no document given, showing the sample strategy");
                    Ok(StrategyDocument::sample())
                }
            };
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(document_path: Option<PathBuf>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(document_path),
        }
    }

    fn ready(&self, document: StrategyDocument) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(document, self.config.clone())))
    }
}

impl eframe::App for RadialStrategyApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(result);
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading strategy document...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load strategy document");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
                if retry {
                    self.state = Self::start_load(self.document_path.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    self.document_path.as_deref(),
                    &mut reload_requested,
                    is_reloading,
                );

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.document_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(document) => self.ready(document),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
