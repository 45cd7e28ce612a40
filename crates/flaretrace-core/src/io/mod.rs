pub mod collect;
pub mod fits;
pub mod loader;

pub use collect::collect_files;
pub use fits::{FitsHeader, FitsReader};
pub use loader::{load_frame, load_frames, parse_obs_time};
