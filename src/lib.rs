// Library entry point
pub mod append;
pub mod config;
pub mod constants;
pub mod context;
pub mod date_format;
pub mod error;
pub mod level;
pub mod logger;
pub mod logging;
pub mod template;

pub use config::{LoggerOptions, Setup};
pub use context::{MissingKeyPolicy, ServerContext};
pub use error::{Error, Result};
pub use level::Level;
pub use logger::Logger;
pub use template::{CallSite, Compositor, Template};
