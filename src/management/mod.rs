mod auth;
mod history;
mod session;
mod signal;

pub use auth::TokenManager;
pub use history::HistoryManager;
pub use history::LoadReport;
pub use session::Session;
pub use signal::Interrupt;
pub use signal::LoadSignal;
