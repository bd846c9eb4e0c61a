//! Control file: decides between training and running, and names the
//! files a session works on.
//!
//! ```text
//! doTrainNotRun:true
//! networkConfigurationFile:xor/network.txt
//! inputSetFile:xor/inputs.txt
//! targetSetFile:xor/targets.txt
//! ```
use std::path::{Path, PathBuf};

use crate::error::{read_text, Result};
use crate::files::scanner::{base_dir, TokenReader};

/// Used when no control file is named on the command line.
pub const DEFAULT_CONTROL_FILE: &str = "controlFiles/defaultControlFile.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct ControlFile {
    pub train: bool,
    pub network_config: PathBuf,
    pub input_set: PathBuf,
    pub target_set: PathBuf,
}

impl ControlFile {
    pub fn parse(text: &str, base: &Path) -> Result<ControlFile> {
        let mut reader = TokenReader::new("control file", text);
        Ok(ControlFile {
            train: reader.labeled_bool("doTrainNotRun")?,
            network_config: reader.labeled_path("networkConfigurationFile", base)?,
            input_set: reader.labeled_path("inputSetFile", base)?,
            target_set: reader.labeled_path("targetSetFile", base)?,
        })
    }

    pub fn load(path: &Path) -> Result<ControlFile> {
        let text = read_text("Control", path)?;
        ControlFile::parse(&text, &base_dir(path))
    }
}
