pub mod config_cmd;
pub mod context;
pub mod onboard;
pub mod prompt;
pub mod status;
pub mod steering;
