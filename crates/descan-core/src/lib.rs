pub mod consts;
pub mod error;
pub mod raster;
pub mod geometry;
pub mod params;
pub mod filters;
pub mod pipeline;
pub mod io;
