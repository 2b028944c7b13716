mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{MAX_UPLOAD_BYTES, Settings};
