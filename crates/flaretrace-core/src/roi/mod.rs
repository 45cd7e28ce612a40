pub mod components;
pub mod config;
pub mod detect;

pub use components::{label_components, ComponentStats, LabelMap};
pub use config::{ComponentSelection, RoiConfig};
pub use detect::{detect_roi, RoiDetection};
