use aq_app::{city_summary, reset_city, select_city, selected_city};
use aq_data::DataStore;
use aq_session::SessionStore;
use chrono::Datelike;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

#[derive(Default)]
pub struct CitiesView {}

impl CitiesView {
    pub fn show(&mut self, ui: &mut egui::Ui, store: &DataStore, session: &mut SessionStore) {
        ui.heading("City Analysis");

        let Some(series) = store.series() else {
            ui.label("Historical data not available. Provide aqi_history.csv in the data folder.");
            return;
        };

        let Some(selected) = selected_city(session, series) else {
            ui.label("No cities found in the historical data");
            return;
        };

        ui.horizontal(|ui| {
            ui.label("Select a city:");
            egui::ComboBox::from_id_salt("city_analysis_selector")
                .selected_text(selected.clone())
                .show_ui(ui, |ui| {
                    for city in series.cities() {
                        if ui.selectable_label(*city == selected, city).clicked() {
                            select_city(session, city);
                        }
                    }
                });

            if ui.button("Reset").clicked() {
                reset_city(session);
            }
        });

        // Re-read after the widgets: selection may have changed above.
        let Some(city) = selected_city(session, series) else {
            return;
        };
        let Some(summary) = city_summary(series, &city) else {
            return;
        };

        ui.separator();

        ui.horizontal(|ui| {
            ui.label(format!("Average AQI: {:.1}", summary.mean_aqi));
            ui.separator();
            ui.label(format!("Best AQI: {:.1}", summary.best_aqi));
            ui.separator();
            ui.label(format!("Worst AQI: {:.1}", summary.worst_aqi));
            ui.separator();
            ui.label(format!("Records: {}", summary.record_count));
        });

        ui.add_space(8.0);

        let trend: Vec<[f64; 2]> = summary
            .aqi_trend
            .iter()
            .map(|(date, aqi)| [date.num_days_from_ce() as f64, *aqi])
            .collect();
        let plot_points: PlotPoints = trend.into();

        Plot::new("city_aqi_trend")
            .legend(Legend::default())
            .height(220.0)
            .x_axis_label("Day")
            .y_axis_label("AQI")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(plot_points).name(&summary.city));
            });

        ui.add_space(8.0);
        ui.label("Monthly average AQI:");

        let monthly_bars: Vec<Bar> = summary
            .monthly_aqi
            .iter()
            .enumerate()
            .map(|(i, (month, aqi))| Bar::new(i as f64, *aqi).name(month))
            .collect();

        Plot::new("city_monthly_aqi")
            .height(180.0)
            .y_axis_label("AQI")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(monthly_bars).name("Monthly average"));
            });

        ui.add_space(8.0);
        ui.label("Average pollutant levels:");

        let pollutant_bars: Vec<Bar> = summary
            .pollutant_means
            .iter()
            .enumerate()
            .map(|(i, (pollutant, mean))| Bar::new(i as f64, *mean).name(pollutant.label()))
            .collect();

        Plot::new("city_pollutant_means")
            .height(180.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(pollutant_bars).name("Pollutant means"));
            });
    }
}
