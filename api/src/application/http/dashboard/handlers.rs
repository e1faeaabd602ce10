pub mod get_dashboard;
pub mod stream_dashboard;
