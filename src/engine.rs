use crate::{
    cmd_log::OutputLog,
    commands,
    config::Config,
    error::Error,
    process::{CmdKind, CmdOutput, GitRunner},
    refresh::{RefreshScheduler, RefreshState},
    status::{parse_status, FileEntry, StatusFlags},
    Res,
};
use std::{path::Path, process::Command};

/// The status engine: owns the process runner, the refresh scheduler,
/// the file status model and the output log. The host drives it with
/// periodic `tick()` calls; all state transitions happen on tick
/// boundaries, so no locking is needed.
pub struct Engine {
    config: Config,
    runner: GitRunner,
    scheduler: RefreshScheduler,
    files: Vec<FileEntry>,
    log: OutputLog,
}

impl Engine {
    /// Creates an engine with an empty model and a dirty scheduler; the
    /// first `tick()` issues the initial status query.
    pub fn new(config: Config, workdir: &Path) -> Self {
        let log = OutputLog::new(config.general.log_cap);

        Self {
            runner: GitRunner::new(workdir),
            scheduler: RefreshScheduler::new(),
            files: Vec::new(),
            log,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn workdir(&self) -> &Path {
        self.runner.workdir()
    }

    /// True iff no external process is currently running.
    pub fn is_ready(&self) -> bool {
        self.runner.is_ready()
    }

    pub fn is_dirty(&self) -> bool {
        self.scheduler.is_dirty()
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.scheduler.state()
    }

    /// The current file status model. Replaced wholesale on each
    /// successful refresh; entry identity does not survive a refresh.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn entry(&self, path: &str) -> Option<&FileEntry> {
        self.files.iter().find(|entry| entry.path == path)
    }

    pub fn log_text(&self) -> &str {
        self.log.text()
    }

    pub fn notify_content_changed(&mut self) {
        self.scheduler.mark_dirty();
    }

    pub fn notify_selection_changed(&mut self) {
        self.scheduler.mark_dirty();
    }

    /// Advances the engine one step: drains a finished process if any,
    /// then issues the status query when dirty and idle. Never blocks.
    pub fn tick(&mut self) -> Res<()> {
        if let Some(output) = self.runner.try_complete()? {
            self.handle_output(output)?;
        }

        if self.scheduler.should_refresh(self.runner.is_ready()) {
            self.scheduler.refresh_started();

            if let Err(err) = self
                .runner
                .spawn(commands::status_query_cmd(&self.config), CmdKind::StatusQuery)
            {
                // Nothing is in flight after a failed spawn; revert to
                // Dirty so a later tick can retry the query.
                self.scheduler.refresh_finished();
                self.scheduler.mark_dirty();
                return Err(err);
            }
        }

        Ok(())
    }

    fn handle_output(&mut self, output: CmdOutput) -> Res<()> {
        match output.kind {
            CmdKind::StatusQuery => {
                self.scheduler.refresh_finished();

                if output.status.success() {
                    self.files = parse_status(&output.stdout, &self.config.project);
                    log::debug!("Status refreshed: {} entries", self.files.len());
                } else {
                    // A failed refresh leaves the previous model in place.
                    self.handle_stderr(&output.stderr);
                    return Err(Error::CmdBadExit(
                        output.args.to_string(),
                        output.status.code(),
                    ));
                }
            }
            CmdKind::Action => {
                self.scheduler.mark_dirty();

                if !output.stdout.is_empty() {
                    log::info!("{}", output.stdout.trim_end());
                    self.log.append(&output.stdout);
                }

                self.handle_stderr(&output.stderr);

                if !output.status.success() {
                    return Err(Error::CmdBadExit(
                        output.args.to_string(),
                        output.status.code(),
                    ));
                }
            }
        }

        Ok(())
    }

    fn handle_stderr(&mut self, stderr: &str) {
        let mut lines = stderr.lines();

        while let Some(line) = lines.next() {
            if line.is_empty() {
                continue;
            }

            if line.contains("warning:") && line.contains("will be replaced by") {
                // This warning spans two lines; keep them together.
                let mut message = line.to_string();
                if let Some(next) = lines.next() {
                    message.push('\n');
                    message.push_str(next);
                }
                log::warn!("git {}", message);
                self.log.push_line(&message);
            } else {
                log::error!("git {}", line);
                self.log.push_line(line);
            }
        }
    }

    fn dispatch(&mut self, cmd: Command) -> Res<()> {
        self.runner.spawn(cmd, CmdKind::Action)?;
        self.scheduler.mark_dirty();
        Ok(())
    }

    pub fn stage(&mut self, entries: &[FileEntry]) -> Res<()> {
        let paths = commands::paths_for(entries, &self.config.project);
        self.dispatch(commands::stage_cmd(&self.config, &paths))
    }

    pub fn stage_all(&mut self) -> Res<()> {
        self.dispatch(commands::stage_all_cmd(&self.config))
    }

    pub fn unstage(&mut self, entries: &[FileEntry]) -> Res<()> {
        let paths = commands::paths_for(entries, &self.config.project);
        self.dispatch(commands::unstage_cmd(&self.config, &paths))
    }

    pub fn unstage_all(&mut self) -> Res<()> {
        self.dispatch(commands::unstage_all_cmd(&self.config))
    }

    pub fn diff(&mut self, entries: &[FileEntry]) -> Res<()> {
        let paths = commands::paths_for(entries, &self.config.project);
        self.dispatch(commands::diff_cmd(&self.config, &paths))
    }

    /// Discards local changes. Destructive: callers must have obtained
    /// explicit confirmation before invoking this; no confirmation
    /// happens here.
    pub fn discard(&mut self, entries: &[FileEntry]) -> Res<()> {
        let paths = commands::paths_for(entries, &self.config.project);
        self.dispatch(commands::discard_cmd(&self.config, &paths))
    }

    /// Commits staged changes. Rejected locally, without any invocation,
    /// when the message is empty or nothing is staged.
    pub fn commit(&mut self, message: &str) -> Res<()> {
        if message.trim().is_empty() {
            return Err(Error::EmptyCommitMessage);
        }

        if !self
            .files
            .iter()
            .any(|entry| entry.has_status(StatusFlags::HAS_STAGED_CHANGES))
        {
            return Err(Error::NothingStaged);
        }

        self.dispatch(commands::commit_cmd(&self.config, message))
    }
}
