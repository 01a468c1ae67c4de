//! File-system helpers
//!
//! Path safety, directory utilities and location file handling. These are
//! the only places the crate touches the file system directly, apart from
//! the location validators reading `location.json`.

mod catalog;
mod dirs;
mod errors;
mod location;
mod safe_join;

pub use catalog::FileLocationCatalog;
pub use dirs::{clean_directory, dirnames, mkdir_p};
pub use errors::{FileError, FileResult};
pub use location::{
    create_location_file, discover_location_files, read_json, read_json_object, CONFIG_FILE,
    DATA_DIR, MODEL_DATA_FILE,
};
pub use safe_join::safe_join;
