use aq_app::{InputForm, run_prediction, stored_prediction};
use aq_core::Pollutant;
use aq_data::DataStore;
use aq_session::SessionStore;
use egui::Color32;

#[derive(Default)]
pub struct PredictView {
    form: InputForm,
    selected_scenario: Option<String>,
    active_tab: PredictTab,
    error: Option<String>,
    notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum PredictTab {
    #[default]
    Inputs,
    Scenarios,
    Guidance,
}

impl PredictView {
    pub fn show(&mut self, ui: &mut egui::Ui, store: &DataStore, session: &mut SessionStore) {
        ui.heading("AQI Prediction");

        // Fail fast: without the model artifact the form is not
        // actionable at all.
        if store.model().is_none() {
            ui.colored_label(
                Color32::RED,
                "Model not available. Provide air_pollution_model.json in the data folder.",
            );
            return;
        }

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.active_tab, PredictTab::Inputs, "Manual Input");
            ui.selectable_value(&mut self.active_tab, PredictTab::Scenarios, "Quick Scenarios");
            ui.selectable_value(&mut self.active_tab, PredictTab::Guidance, "Guidance");
        });

        ui.separator();

        match self.active_tab {
            PredictTab::Inputs => self.show_inputs(ui, session),
            PredictTab::Scenarios => self.show_scenarios(ui, store, session),
            PredictTab::Guidance => show_guidance(ui, store),
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Predict AQI").clicked() {
                match run_prediction(store, session, &self.form) {
                    Ok(_) => {
                        self.error = None;
                        self.notice = None;
                    }
                    Err(err) => self.error = Some(err.to_string()),
                }
            }

            if ui.button("Reset").clicked() {
                self.form.reset(session);
                self.error = None;
                self.notice = Some("Inputs reset. Enter new values.".to_string());
            }
        });

        if let Some(err) = &self.error {
            ui.colored_label(Color32::RED, err);
        }
        if let Some(notice) = &self.notice {
            ui.label(notice);
        }

        if let Some(prediction) = stored_prediction(session) {
            let (r, g, b) = prediction.category.color_rgb();
            let color = Color32::from_rgb(r, g, b);

            ui.add_space(8.0);
            egui::Frame::group(ui.style())
                .stroke(egui::Stroke::new(2.0, color))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(format!("AQI: {}", prediction.aqi));
                        ui.colored_label(color, prediction.category.label());
                        ui.label(prediction.category.advisory());
                    });
                });
        }
    }

    fn show_inputs(&mut self, ui: &mut egui::Ui, session: &mut SessionStore) {
        ui.label("Enter pollutant concentrations:");

        for pollutant in Pollutant::ALL {
            let spec = pollutant.spec();
            // Session override wins over the widget's own value, so a
            // freshly applied scenario is what the user sees.
            let mut value = session
                .number(InputForm::session_key(pollutant))
                .unwrap_or_else(|| self.form.widget_value(pollutant));

            ui.horizontal(|ui| {
                ui.label(format!("{} ({})", pollutant.label(), pollutant.units()));
                let response = ui.add(
                    egui::DragValue::new(&mut value)
                        .speed(spec.step)
                        .range(spec.min..=spec.max),
                );
                if response.changed() {
                    // A direct edit takes over from any scenario value.
                    if let Ok(clamped) = self.form.set_field(pollutant, value) {
                        session.set(InputForm::session_key(pollutant), clamped);
                    }
                }
            });
        }
    }

    fn show_scenarios(&mut self, ui: &mut egui::Ui, store: &DataStore, session: &mut SessionStore) {
        if store.scenarios().is_empty() {
            ui.label("No scenario presets available");
            return;
        }

        let selected_text = self
            .selected_scenario
            .clone()
            .unwrap_or_else(|| "Choose a scenario".to_string());

        egui::ComboBox::from_id_salt("scenario_selector")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for scenario in store.scenarios() {
                    let is_selected = self.selected_scenario.as_deref() == Some(&scenario.name);
                    if ui.selectable_label(is_selected, &scenario.name).clicked() {
                        self.selected_scenario = Some(scenario.name.clone());
                    }
                }
            });

        if let Some(name) = self.selected_scenario.clone() {
            if let Some(scenario) = store.scenario(&name) {
                let reading = scenario.resolved();
                ui.label(format!(
                    "CO {} | Ozone {} | PM10 {} | PM2.5 {} | NO2 {}",
                    reading.co, reading.ozone, reading.pm10, reading.pm25, reading.no2
                ));

                if ui.button("Apply This Scenario").clicked() {
                    InputForm::apply_scenario(session, scenario);
                    self.notice =
                        Some("Scenario applied. Switch to the Manual Input tab.".to_string());
                }
            }
        }
    }
}

fn show_guidance(ui: &mut egui::Ui, store: &DataStore) {
    ui.label("Accepted input ranges:");

    egui::Grid::new("guidance_grid").striped(true).show(ui, |ui| {
        ui.label("Pollutant");
        ui.label("Units");
        ui.label("Range");
        if store.stats().is_some() {
            ui.label("Observed mean");
            ui.label("Observed min");
            ui.label("Observed max");
        }
        ui.end_row();

        for pollutant in Pollutant::ALL {
            let spec = pollutant.spec();
            ui.label(pollutant.label());
            ui.label(pollutant.units());
            ui.label(format!("{} - {}", spec.min, spec.max));
            if let Some(stats) = store.stats() {
                match stats.get(pollutant) {
                    Some(summary) => {
                        ui.label(format!("{:.1}", summary.mean));
                        ui.label(format!("{:.1}", summary.min));
                        ui.label(format!("{:.1}", summary.max));
                    }
                    None => {
                        ui.label("-");
                        ui.label("-");
                        ui.label("-");
                    }
                }
            }
            ui.end_row();
        }
    });
}
