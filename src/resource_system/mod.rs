pub mod file_formats;
pub mod rig_loader;

pub use rig_loader::{load_rigs, save_rigs};
