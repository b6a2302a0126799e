use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use serde::de::DeserializeOwned;
use stressmap::{QuadLayout, StepInput};
use thiserror::Error;

/// Error raised while reading the input files.
#[derive(Debug, Error)]
pub enum InputError {
    /// Returned when a file cannot be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when a file is not valid JSON for the expected shape.
    #[error("cannot parse {path}: {source}")]
    Json {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Reduce one step of quad stress samples to colour-map cell data.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Cli {
    /// JSON file holding one step of samples and volumes
    #[arg(value_hint = ValueHint::FilePath)]
    pub step: PathBuf,

    /// JSON file overriding the quad layout
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub layout: Option<PathBuf>,
}

/// Read a JSON document from `path`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the step and the layout named on the command line.
pub fn load(cli: &Cli) -> Result<(StepInput, QuadLayout), InputError> {
    let step = read_json(&cli.step)?;
    let layout = match &cli.layout {
        Some(path) => read_json(path)?,
        None => QuadLayout::default(),
    };
    Ok((step, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_step_and_layout() {
        let cli = Cli::try_parse_from(["stressmap", "step.json", "--layout", "quad.json"])
            .expect("valid arguments");
        assert_eq!(cli.step, PathBuf::from("step.json"));
        assert_eq!(cli.layout, Some(PathBuf::from("quad.json")));
    }

    #[test]
    fn rejects_missing_or_extra_arguments() {
        let missing = Cli::try_parse_from(["stressmap"]).expect_err("step file required");
        assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);

        assert!(Cli::try_parse_from(["stressmap", "a.json", "b.json"]).is_err());
        assert!(Cli::try_parse_from(["stressmap", "a.json", "--layout"]).is_err());
    }

    #[test]
    fn loads_step_from_disk() {
        let dir = std::env::temp_dir().join(format!("stressmap-input-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let step_path = dir.join("step.json");
        fs::write(
            &step_path,
            r#"{"samples": [[1,0,0],[1,0,0],[1,0,0],[1,0,0]], "volumes": [0.5]}"#,
        )
        .expect("step written");

        let (step, layout) = load(&Cli {
            step: step_path,
            layout: None,
        })
        .expect("step loads");
        assert_eq!(step.samples.len(), 4);
        assert_eq!(step.volumes, vec![0.5]);
        assert_eq!(layout, QuadLayout::default());

        let missing = load(&Cli {
            step: dir.join("missing.json"),
            layout: None,
        });
        assert!(matches!(missing, Err(InputError::Io { .. })));
        fs::remove_dir_all(&dir).expect("temp dir removed");
    }
}
