//! Native library acquisition: fetch a prebuilt release or build locally

pub mod builder;
pub mod resolver;
pub mod targets;

pub use builder::LocalBuilder;
pub use resolver::ReleaseResolver;
pub use targets::Target;
