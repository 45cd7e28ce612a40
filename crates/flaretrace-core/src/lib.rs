pub mod error;
pub mod consts;
pub mod frame;
pub mod config;
pub mod io;
pub mod image;
pub mod roi;
pub mod series;
pub mod plot;
pub mod pipeline;
