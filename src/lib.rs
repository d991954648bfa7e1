pub mod config;
pub mod config_processors;
pub mod dataframeutils;
pub mod endpoints;
pub mod error;
pub mod io;
pub mod recommender;
pub mod similarity;
pub mod stopwatch;
