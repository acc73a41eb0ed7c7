use crate::{cmd_log::command_args, error::Error, Res};
use std::{
    borrow::Cow,
    io::Read,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdKind {
    StatusQuery,
    Action,
}

pub struct CmdOutput {
    pub args: Cow<'static, str>,
    pub kind: CmdKind,
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

/// Supervises at most one external process at a time. Commands issued
/// while one is in flight are refused, never queued. There is no timeout,
/// and output is drained only after exit, so a hung tool, or one writing
/// more than the OS pipe buffer before exiting, blocks further commands
/// indefinitely.
pub struct GitRunner {
    workdir: PathBuf,
    pending: Option<PendingCmd>,
}

struct PendingCmd {
    child: Child,
    args: Cow<'static, str>,
    kind: CmdKind,
}

impl GitRunner {
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            pending: None,
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn is_ready(&self) -> bool {
        self.pending.is_none()
    }

    /// Start `cmd` without awaiting it, capturing stdout and stderr.
    /// Returns `Error::CmdAlreadyRunning` when a process is in flight.
    pub fn spawn(&mut self, mut cmd: Command, kind: CmdKind) -> Res<()> {
        if self.pending.is_some() {
            return Err(Error::CmdAlreadyRunning);
        }

        cmd.current_dir(&self.workdir);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let args = command_args(&cmd);
        log::debug!("Spawning '{}'", args);

        let child = cmd.spawn().map_err(Error::SpawnCmd)?;
        self.pending = Some(PendingCmd { child, args, kind });

        Ok(())
    }

    /// Drains the pending process without blocking. Returns its output
    /// once it has exited, `None` while it is still running or when
    /// nothing is in flight.
    pub fn try_complete(&mut self) -> Res<Option<CmdOutput>> {
        let Some(pending) = &mut self.pending else {
            return Ok(None);
        };

        let Some(status) = pending.child.try_wait().map_err(Error::CouldntAwaitCmd)? else {
            return Ok(None);
        };

        let mut pending = self.pending.take().expect("pending cmd checked above");
        log::debug!("'{}' finished with {:?}", pending.args, status);

        let stdout = read_stream(pending.child.stdout.take())?;
        let stderr = read_stream(pending.child.stderr.take())?;

        Ok(Some(CmdOutput {
            args: pending.args,
            kind: pending.kind,
            stdout,
            stderr,
            status,
        }))
    }
}

fn read_stream(stream: Option<impl Read>) -> Res<String> {
    let mut bytes = Vec::new();

    if let Some(mut stream) = stream {
        stream
            .read_to_end(&mut bytes)
            .map_err(Error::CouldntReadCmdOutput)?;
    }

    Ok(String::from_utf8_lossy(&bytes).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failure_is_an_explicit_error() {
        let mut runner = GitRunner::new(Path::new("."));
        let result = runner.spawn(
            Command::new("this-binary-does-not-exist-anywhere"),
            CmdKind::Action,
        );

        assert!(matches!(result, Err(Error::SpawnCmd(_))));
        assert!(runner.is_ready());
    }

    #[test]
    fn runner_starts_ready() {
        let runner = GitRunner::new(Path::new("."));
        assert!(runner.is_ready());
    }
}
