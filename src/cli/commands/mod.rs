//! CLI command implementations.

mod chat;
mod config;
mod doctor;
mod feedback;
mod index;
mod init;
mod pitch;

pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use feedback::run_feedback;
pub use index::run_index;
pub use init::run_init;
pub use pitch::run_pitch;
