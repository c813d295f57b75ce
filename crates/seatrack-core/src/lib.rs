pub mod config;
pub mod error;
pub mod geodesy;
pub mod kinematics;
pub mod normalizer;
pub mod outputs;
pub mod pipeline;
pub mod trip;
pub mod types;
