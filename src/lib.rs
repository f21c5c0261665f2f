pub mod indicator;
pub mod logging;
pub mod settings;
pub mod preview;
