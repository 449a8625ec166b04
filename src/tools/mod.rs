mod file_system;
mod path_normalizer;
mod path_validator;
mod progress;

pub use file_system::{FileSystem, LocalFileSystem};
pub use path_normalizer::{
    apply_name_normalization, normalize_name, normalize_path, translate_artwork_path,
};
pub use path_validator::{is_same_or_inside, validate_file_exists};
pub use progress::{ConsoleProgress, ProgressReporter, percent_of};
