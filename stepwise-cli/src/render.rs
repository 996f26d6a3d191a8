//! Drives the external animation renderer.
//!
//! The renderer receives the original input and a JSON file containing the successful
//! [`Envelope`]; scene composition and video encoding are entirely up to it.

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use stepwise_core::Envelope;
use thiserror::Error;

/// Quality level of the rendered animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 480p at 15 frames per second.
    #[default]
    L,

    /// 720p at 30 frames per second.
    M,

    /// 1080p at 60 frames per second.
    H,

    /// 2160p at 60 frames per second.
    K,
}

impl Quality {
    /// The letter passed to the renderer.
    pub fn letter(self) -> char {
        match self {
            Self::L => 'l',
            Self::M => 'm',
            Self::H => 'h',
            Self::K => 'k',
        }
    }

    /// The directory the renderer places videos of this quality in.
    pub fn media_subdir(self) -> &'static str {
        match self {
            Self::L => "480p15",
            Self::M => "720p30",
            Self::H => "1080p60",
            Self::K => "2160p60",
        }
    }
}

/// Configuration of the external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// The renderer program.
    pub program: String,

    /// The file containing the scene definition.
    pub scene_file: PathBuf,

    /// The name of the scene to render.
    pub scene: String,

    /// The default quality.
    pub quality: Quality,

    /// Whether to open a preview after rendering.
    pub preview: bool,

    /// The directory the renderer writes its output to.
    pub media_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: "manim".to_string(),
            scene_file: PathBuf::from("scenes/steps_animator.py"),
            scene: "MathStepsAnimator".to_string(),
            quality: Quality::L,
            preview: true,
            media_dir: PathBuf::from("media"),
        }
    }
}

impl RenderConfig {
    /// Returns the directory the renderer will place the video in.
    pub fn video_dir(&self) -> PathBuf {
        let stem = self.scene_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.media_dir.join("videos").join(stem).join(self.quality.media_subdir())
    }
}

/// An error that occurred while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Only successful results can be animated.
    #[error("cannot create animation: {0}")]
    NotRenderable(String),

    /// The renderer program could not be found.
    #[error("renderer `{0}` not found; install it (e.g. `pip install manim`) or set `render.program`")]
    NotFound(String),

    /// The renderer exited unsuccessfully.
    #[error("animation failed with {status}{detail}")]
    Failed {
        /// The exit status of the renderer.
        status: String,

        /// What the renderer printed to stderr, prefixed with `: `, if it was captured.
        detail: String,
    },

    /// The steps could not be handed to the renderer.
    #[error("failed to prepare animation: {0}")]
    Io(#[from] io::Error),
}

/// Builds the command that renders the given input, whose steps are stored at `steps_file`.
pub fn build_command(input: &str, steps_file: &Path, config: &RenderConfig) -> Command {
    let quality_flag = if config.preview {
        format!("-p{}", config.quality.letter())
    } else {
        format!("-{}", config.quality.letter())
    };

    let mut command = Command::new(&config.program);
    command
        .arg(quality_flag)
        .arg(&config.scene_file)
        .arg(&config.scene)
        .arg("--")
        .arg("--equation")
        .arg(input)
        .arg("--steps")
        .arg(steps_file);
    command
}

/// Returns the most recently modified `.mp4` file in the given directory.
pub fn latest_video(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir).ok()?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().map(|ext| ext == "mp4").unwrap_or(false))
        .filter_map(|entry| Some((entry.metadata().ok()?.modified().ok()?, entry.path())))
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}

/// Renders an animation of the given result.
///
/// Returns the path of the rendered video, if it could be located.
pub fn animate(envelope: &Envelope, config: &RenderConfig) -> Result<Option<PathBuf>, RenderError> {
    if let Envelope::Failure(failure) = envelope {
        return Err(RenderError::NotRenderable(failure.error_message.clone()));
    }

    let mut steps_file = tempfile::Builder::new()
        .prefix("stepwise-")
        .suffix(".json")
        .tempfile()?;
    serde_json::to_writer(&mut steps_file, envelope).map_err(io::Error::from)?;
    steps_file.flush()?;

    let mut command = build_command(envelope.input(), steps_file.path(), config);
    info!("rendering `{}` at quality {}", envelope.input(), config.quality.letter());
    debug!("running {:?}", command);

    // let the renderer talk to the terminal while previewing
    let result = if config.preview {
        command.status().map(|status| (status, String::new()))
    } else {
        command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map(|output| (output.status, String::from_utf8_lossy(&output.stderr).trim().to_string()))
    };

    let (status, stderr) = match result {
        Ok(result) => result,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(RenderError::NotFound(config.program.clone()));
        },
        Err(err) => return Err(err.into()),
    };

    if !status.success() {
        let detail = if stderr.is_empty() { stderr } else { format!(": {}", stderr) };
        return Err(RenderError::Failed { status: status.to_string(), detail });
    }

    Ok(latest_video(&config.video_dir()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::ffi::OsStr;
    use stepwise_core::{FailureKind, InputKind};

    #[test]
    fn command_arguments() {
        let config = RenderConfig { quality: Quality::H, ..Default::default() };
        let command = build_command("5x+3=0", Path::new("/tmp/steps.json"), &config);

        assert_eq!(command.get_program(), OsStr::new("manim"));
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            ["-ph", "scenes/steps_animator.py", "MathStepsAnimator", "--", "--equation", "5x+3=0", "--steps", "/tmp/steps.json"]
                .map(OsStr::new),
        );

        let config = RenderConfig { preview: false, ..config };
        let command = build_command("5x+3=0", Path::new("steps.json"), &config);
        assert_eq!(command.get_args().next(), Some(OsStr::new("-h")));
    }

    #[test]
    fn video_dir() {
        let config = RenderConfig { quality: Quality::K, ..Default::default() };
        assert_eq!(config.video_dir(), Path::new("media/videos/steps_animator/2160p60"));
    }

    #[test]
    fn finds_latest_video() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_video(dir.path()), None);

        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("a.mp4"), "").unwrap();
        assert_eq!(latest_video(dir.path()), Some(dir.path().join("a.mp4")));
        assert_eq!(latest_video(&dir.path().join("missing")), None);
    }

    #[test]
    fn refuses_failures() {
        let envelope = Envelope::failure("", "", InputKind::Expression, FailureKind::InvalidInput, "empty", None);
        let config = RenderConfig { program: "this-program-does-not-exist".to_string(), ..Default::default() };
        assert!(matches!(animate(&envelope, &config), Err(RenderError::NotRenderable(_))));
    }

    #[test]
    fn missing_renderer() {
        let envelope = Envelope::success("x=1", "x=1", InputKind::Equation, vec![]);
        let config = RenderConfig {
            program: "this-program-does-not-exist".to_string(),
            preview: false,
            ..Default::default()
        };
        assert!(matches!(animate(&envelope, &config), Err(RenderError::NotFound(_))));
    }
}
