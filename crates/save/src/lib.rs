pub mod container;
pub mod precision_save;
pub mod save_error;
pub mod save_restore;
pub mod scaling_save;
pub mod serialization;
pub mod snapping_save;


pub use save_error::SaveError;
pub use save_restore::{restore_overlay, save_overlay};
