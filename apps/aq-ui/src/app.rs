use crate::views::{CitiesView, HistoryView, PredictView};
use aq_data::DataStore;
use aq_session::SessionStore;
use egui_file_dialog::{DialogMode, FileDialog};
use std::path::PathBuf;

pub struct AirQualityApp {
    data_dir: PathBuf,
    store: DataStore,
    session: SessionStore,
    file_dialog: FileDialog,
    active_view: ViewTab,
    predict_view: PredictView,
    history_view: HistoryView,
    cities_view: CitiesView,
    status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ViewTab {
    Predict,
    History,
    Cities,
}

impl AirQualityApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let data_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let store = DataStore::load(&data_dir);

        Self {
            data_dir,
            store,
            session: SessionStore::new(),
            file_dialog: FileDialog::new(),
            active_view: ViewTab::Predict,
            predict_view: PredictView::default(),
            history_view: HistoryView::default(),
            cities_view: CitiesView::default(),
            status: None,
        }
    }

    fn reload(&mut self) {
        self.store = DataStore::load(&self.data_dir);
        // A fresh data directory invalidates every prior session choice.
        self.session = SessionStore::new();
        self.predict_view = PredictView::default();
        self.history_view = HistoryView::default();
        self.cities_view = CitiesView::default();
        self.status = Some(format!("Loaded data from {}", self.data_dir.display()));
    }
}

impl eframe::App for AirQualityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Data Folder").clicked() {
                    let initial_dir = self.data_dir.to_str();
                    let _ = self
                        .file_dialog
                        .open(DialogMode::SelectDirectory, true, initial_dir);
                }

                if ui.button("Reload").clicked() {
                    self.reload();
                }

                ui.separator();
                ui.label(format!("Data: {}", self.data_dir.display()));
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            self.data_dir = path.to_path_buf();
            self.reload();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_view, ViewTab::Predict, "AQI Prediction");
                ui.selectable_value(&mut self.active_view, ViewTab::History, "Historical Data");
                ui.selectable_value(&mut self.active_view, ViewTab::Cities, "City Analysis");
            });

            ui.separator();

            match self.active_view {
                ViewTab::Predict => {
                    self.predict_view.show(ui, &self.store, &mut self.session);
                }
                ViewTab::History => {
                    self.history_view.show(ui, &self.store, &mut self.session);
                }
                ViewTab::Cities => {
                    self.cities_view.show(ui, &self.store, &mut self.session);
                }
            }

            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }
}
