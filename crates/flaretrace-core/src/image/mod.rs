pub mod diff;
pub mod gaussian;
pub mod rotate;

pub use diff::abs_diff;
pub use gaussian::gaussian_blur;
pub use rotate::rotate;
