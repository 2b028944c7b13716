mod download;
mod generate_report;
mod health;
mod home;

pub use download::download_handler;
pub use generate_report::generate_report_handler;
pub use health::health_handler;
pub use home::home_handler;
