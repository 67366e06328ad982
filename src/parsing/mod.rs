mod builder;
mod opus_file;

pub use builder::ContainerBuilder;
pub use opus_file::{OpusFile, SkippedBlock};
