mod download;
pub(crate) use download::download_save_file;
pub use download::DOWNLOAD_NAME;

mod load;
pub(crate) use load::{load_save_file, load_zip_file};

mod update;
pub(crate) use update::update_save_file;
