mod config;
mod error;
mod exif_reader;
mod file_times;
mod media;
mod metadata;
mod renamer;
mod resolver;
mod runner;
mod scanner;
mod video_reader;

pub use config::{app_paths, load_config, save_config, AppConfig, AppPaths};
pub use media::{ExtensionClassifier, MediaKind};
pub use metadata::DateSource;
pub use renamer::RenameOutcome;
pub use runner::{run, FileReport, RunOptions, RunReport, RunStats};
