use std::collections::BTreeMap;

use aq_app::{
    FilterSelection, HistoricalView, Metric, applied_filters, apply_filters, compute_view_with,
    reset_filters,
};
use aq_data::DataStore;
use aq_session::{SessionStore, keys};
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

pub struct HistoryView {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    cities: Vec<String>,
    metric: Metric,
    active_tab: HistoryTab,
    error: Option<String>,
}

impl Default for HistoryView {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            cities: Vec::new(),
            metric: Metric::Aqi,
            active_tab: HistoryTab::Trends,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HistoryTab {
    Trends,
    CityComparison,
    Statistics,
}

impl HistoryView {
    pub fn show(&mut self, ui: &mut egui::Ui, store: &DataStore, session: &mut SessionStore) {
        ui.heading("Historical Data Explorer");

        let Some(series) = store.series() else {
            ui.label("Historical data not available. Provide aqi_history.csv in the data folder.");
            return;
        };

        let (min_date, max_date) = series.date_range();

        // Widget defaults: session value if a filter was applied, else
        // the series' observed bounds.
        let mut from = self
            .from
            .or_else(|| session.date(keys::HISTORY_FROM_DATE))
            .unwrap_or(min_date);
        let mut to = self
            .to
            .or_else(|| session.date(keys::HISTORY_TO_DATE))
            .unwrap_or(max_date);

        ui.horizontal(|ui| {
            ui.label("From:");
            if ui
                .add(egui_extras::DatePickerButton::new(&mut from).id_salt("from_date"))
                .changed()
            {
                self.from = Some(from);
            }

            ui.label("To:");
            if ui
                .add(egui_extras::DatePickerButton::new(&mut to).id_salt("to_date"))
                .changed()
            {
                self.to = Some(to);
            }

            egui::ComboBox::from_id_salt("city_selector")
                .selected_text(format!("{} city(ies) selected", self.cities.len()))
                .show_ui(ui, |ui| {
                    for city in series.cities() {
                        let mut is_selected = self.cities.contains(city);
                        if ui.checkbox(&mut is_selected, city).changed() {
                            if is_selected {
                                self.cities.push(city.clone());
                            } else {
                                self.cities.retain(|c| c != city);
                            }
                        }
                    }
                });

            egui::ComboBox::from_id_salt("metric_selector")
                .selected_text(self.metric.label())
                .show_ui(ui, |ui| {
                    for metric in Metric::ALL {
                        ui.selectable_value(&mut self.metric, metric, metric.label());
                    }
                });
        });

        ui.horizontal(|ui| {
            if ui.button("Apply Filters & Analyze").clicked() {
                let selection = FilterSelection {
                    from,
                    to,
                    cities: self.cities.clone(),
                    metric: self.metric,
                };
                match apply_filters(series, session, &selection) {
                    Ok(()) => self.error = None,
                    Err(err) => self.error = Some(err.to_string()),
                }
            }

            if ui.button("Reset Filters").clicked() {
                reset_filters(session);
                self.from = None;
                self.to = None;
                self.cities.clear();
                self.metric = Metric::Aqi;
                self.error = None;
            }
        });

        if let Some(err) = &self.error {
            ui.colored_label(Color32::RED, err);
        }

        ui.separator();

        // "Not applied" renders a prompt; an applied-but-empty result
        // renders a notice. The two states are deliberately distinct.
        let Some(applied) = applied_filters(session) else {
            ui.label("Select filters and press 'Apply Filters & Analyze' to see the data.");
            return;
        };

        match compute_view_with(series, &applied) {
            HistoricalView::NotApplied => unreachable!("applied_filters returned a selection"),
            HistoricalView::Empty => {
                ui.label("No records matched the selected filters. Try different filters.");
            }
            HistoricalView::Ready {
                rows,
                per_city,
                overall,
            } => {
                ui.label(format!("Showing: {} records", rows.len()));

                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.active_tab, HistoryTab::Trends, "Time Trends");
                    ui.selectable_value(
                        &mut self.active_tab,
                        HistoryTab::CityComparison,
                        "City Comparison",
                    );
                    ui.selectable_value(
                        &mut self.active_tab,
                        HistoryTab::Statistics,
                        "Statistics",
                    );
                });

                ui.separator();

                match self.active_tab {
                    HistoryTab::Trends => show_trends(ui, &rows, applied.metric),
                    HistoryTab::CityComparison => show_city_comparison(ui, &per_city, applied.metric),
                    HistoryTab::Statistics => show_statistics(ui, &overall, applied.metric),
                }
            }
        }
    }
}

fn show_trends(ui: &mut egui::Ui, rows: &[aq_data::HistoricalRecord], metric: Metric) {
    let mut by_city: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for row in rows {
        by_city
            .entry(row.city.as_str())
            .or_default()
            .push([row.date.num_days_from_ce() as f64, metric.value_of(row)]);
    }

    Plot::new("history_trend")
        .legend(Legend::default())
        .x_axis_label("Day")
        .y_axis_label(metric.label())
        .show(ui, |plot_ui| {
            for (city, points) in by_city {
                let plot_points: PlotPoints = points.into();
                plot_ui.line(Line::new(plot_points).name(city));
            }
        });
}

fn show_city_comparison(ui: &mut egui::Ui, per_city: &[aq_app::CityMetricRow], metric: Metric) {
    egui::Grid::new("city_stats_grid").striped(true).show(ui, |ui| {
        ui.label("City");
        ui.label("Mean");
        ui.label("Min");
        ui.label("Max");
        ui.end_row();

        for row in per_city {
            ui.label(&row.city);
            ui.label(format!("{:.2}", row.summary.mean));
            ui.label(format!("{:.2}", row.summary.min));
            ui.label(format!("{:.2}", row.summary.max));
            ui.end_row();
        }
    });

    ui.add_space(8.0);

    let bars: Vec<Bar> = per_city
        .iter()
        .enumerate()
        .map(|(i, row)| Bar::new(i as f64, row.summary.mean).name(&row.city))
        .collect();

    Plot::new("city_means")
        .legend(Legend::default())
        .y_axis_label(format!("Average {}", metric.label()))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(format!("Average {}", metric.label())));
        });
}

fn show_statistics(ui: &mut egui::Ui, overall: &aq_app::OverallSummary, metric: Metric) {
    ui.label(format!("Overall {}:", metric.label()));
    ui.horizontal(|ui| {
        ui.label(format!("Average: {:.2}", overall.mean));
        ui.separator();
        ui.label(format!("Median: {:.2}", overall.median));
        ui.separator();
        ui.label(format!("Minimum: {:.2}", overall.min));
        ui.separator();
        ui.label(format!("Maximum: {:.2}", overall.max));
    });
}
