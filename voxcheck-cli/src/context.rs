use std::path::Path;
use voxcheck::config::{ConfigLoader, VoxcheckConfig};
use voxcheck::prelude::*;

pub struct VoxcheckCliContext {
    pub config: VoxcheckConfig,
    pub engine: ValidationEngine,
}

impl VoxcheckCliContext {
    pub fn new(config: VoxcheckConfig) -> voxcheck::Result<Self> {
        let engine = voxcheck::init(config.clone())?;
        Ok(Self { config, engine })
    }
}

/// Load configuration from an explicit file, or from the default locations
/// when none is given. Environment variables are applied last either way.
pub fn load_config(path: Option<&Path>) -> voxcheck::Result<VoxcheckConfig> {
    let mut loader = ConfigLoader::new();
    match path {
        Some(path) => {
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files()?;
        }
    }
    loader.load_env();
    Ok(loader.extract()?)
}
