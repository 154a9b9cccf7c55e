//! Render through an installed Graphviz `dot` binary.

use crate::dot::to_dot;
use crate::engine::RenderEngine;
use crate::error::RenderError;
use crate::model::Graph;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Debug, Clone)]
pub struct GraphvizEngine {
    pub program: PathBuf,
}

impl Default for GraphvizEngine {
    fn default() -> Self {
        Self {
            program: PathBuf::from("dot"),
        }
    }
}

impl GraphvizEngine {
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn failed(&self, message: String) -> RenderError {
        RenderError::EngineFailed {
            engine: self.program.display().to_string(),
            message,
        }
    }
}

impl RenderEngine for GraphvizEngine {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn render_png(&self, graph: &Graph) -> Result<Vec<u8>, RenderError> {
        let source = to_dot(graph);
        let format = format!("-T{}", graph.directives.format.extension());

        let mut child = Command::new(&self.program)
            .arg(&format)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::EngineUnavailable {
                engine: self.program.display().to_string(),
                source,
            })?;

        // Dropping stdin closes the pipe; the child is always reaped below.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|err| self.failed(format!("waiting for process: {err}")))?;

        if let Err(err) = written {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failed(format!(
                "writing DOT to stdin: {err} ({}; {})",
                output.status,
                stderr.trim()
            )));
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failed(format!("{} ({})", stderr.trim(), output.status)));
        }
        if output.stdout.is_empty() {
            return Err(self.failed("produced no output".to_string()));
        }
        Ok(output.stdout)
    }
}
