pub mod bar_series;
pub mod quote;
pub mod request_params;
