pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{APP_ID, DATA_DIR_ENV, VENDOR, get_data_dir};
pub use paths::format_path_with_tilde;
pub use terminal::sanitize_for_terminal;
