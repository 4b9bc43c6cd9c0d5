//! Runs an executable resource and captures what it prints.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::ServeConfig;
use crate::error::Error;

/// Runs `<interpreter> <script_path>` and returns its stdout verbatim.
///
/// stdin is closed, stderr is discarded, and the exit status is not
/// inspected: a failing script ships whatever it managed to print, as a
/// 200. `output()` waits for the child to exit before returning, so the
/// process is reaped in every outcome and never left as a zombie.
///
/// The one failure reported upward is not being able to start the child at
/// all (interpreter missing, exec denied); that maps to the read-failure
/// class like any other unreadable resource.
pub(crate) async fn run(config: &ServeConfig, script_path: &Path) -> Result<Vec<u8>, Error> {
    let output = Command::new(&config.interpreter)
        .arg(script_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|source| Error::Read {
            path: script_path.display().to_string(),
            source,
        })?;

    Ok(output.stdout)
}
