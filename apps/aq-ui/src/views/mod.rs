pub mod cities_view;
pub mod history_view;
pub mod predict_view;

pub use cities_view::CitiesView;
pub use history_view::HistoryView;
pub use predict_view::PredictView;
