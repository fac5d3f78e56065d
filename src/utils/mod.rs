mod command_to_string;
mod detect_software;
mod path_utils;

pub use command_to_string::command_to_string;

pub use detect_software::check_program;
pub use detect_software::resolve_program;

pub use path_utils::expand_and_resolve_path;
pub use path_utils::require_directory;
pub use path_utils::with_trailing_separator;
