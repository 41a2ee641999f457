//! Configuration for the absorption-probability pipeline.

use std::path::{Path, PathBuf};

use crate::error::ChainError;

/// Default name of the binary system file inside the scratch directory.
pub const DEFAULT_INPUT_NAME: &str = "Ab.petsc";
/// Default name of the solver's output file inside the scratch directory.
pub const DEFAULT_OUTPUT_NAME: &str = "sol.matlab";

/// Configuration for [`absorption_probabilities`](crate::absorption_probabilities).
///
/// Every run creates its own scratch directory under
/// [`scratch_root`](Self::scratch_root) and removes it on exit.
///
/// # Example
///
/// ```
/// use absorb_markov::PipelineConfig;
///
/// let config = PipelineConfig::new()
///     .with_scratch_root("/var/tmp")
///     .with_input_name("system.bin");
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.output_name(), "sol.matlab");
/// ```
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    scratch_root: PathBuf,
    input_name: String,
    output_name: String,
}

impl PipelineConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `scratch_root` = the system temporary directory,
    /// `input_name = "Ab.petsc"`, `output_name = "sol.matlab"`.
    pub fn new() -> Self {
        Self {
            scratch_root: std::env::temp_dir(),
            input_name: DEFAULT_INPUT_NAME.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    /// Sets the directory scratch directories are created in.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = root.into();
        self
    }

    /// Sets the file name of the binary system file.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    /// Sets the file name the solver writes its solution to.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    // --- Accessors ---

    /// Returns the scratch root.
    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }

    /// Returns the system file name.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Returns the solution file name.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Validates this configuration.
    ///
    /// Both file names must be plain, non-empty, distinct file names.
    pub fn validate(&self) -> Result<(), ChainError> {
        for (field, name) in [
            ("input_name", &self.input_name),
            ("output_name", &self.output_name),
        ] {
            if !is_plain_file_name(name) {
                return Err(ChainError::InvalidConfig {
                    reason: format!("{field} must be a plain file name, got {name:?}"),
                });
            }
        }
        if self.input_name == self.output_name {
            return Err(ChainError::InvalidConfig {
                reason: "input_name and output_name must differ".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PipelineConfig::new();
        assert_eq!(cfg.scratch_root(), std::env::temp_dir().as_path());
        assert_eq!(cfg.input_name(), "Ab.petsc");
        assert_eq!(cfg.output_name(), "sol.matlab");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chaining() {
        let cfg = PipelineConfig::new()
            .with_scratch_root("/scratch")
            .with_input_name("a.bin")
            .with_output_name("x.txt");
        assert_eq!(cfg.scratch_root(), Path::new("/scratch"));
        assert_eq!(cfg.input_name(), "a.bin");
        assert_eq!(cfg.output_name(), "x.txt");
    }

    #[test]
    fn rejects_paths_and_empty_names() {
        for bad in ["", "..", "dir/a.bin", "/abs.bin"] {
            let cfg = PipelineConfig::new().with_input_name(bad);
            assert!(cfg.validate().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_identical_names() {
        let cfg = PipelineConfig::new()
            .with_input_name("same")
            .with_output_name("same");
        assert!(matches!(
            cfg.validate(),
            Err(ChainError::InvalidConfig { .. })
        ));
    }
}
