pub mod archive;
pub mod error;
pub mod layout;
pub mod persist;
pub mod report;

pub use archive::zip_directory;
pub use error::FrontendError;
pub use layout::OutputLayout;
pub use persist::{
    PersistOutcome, cheat_file_contents, cheat_folders, persist_build, persist_title,
    read_cheat_file,
};
pub use report::{render_index, render_title_page, write_index, write_title_page};
