use std::{fmt::Display, io};

#[derive(Debug)]
pub enum Error {
    Config(toml::de::Error),
    ReadConfigFile(io::Error),
    CurrentDir(io::Error),
    FileWatcher(notify::Error),
    CmdAlreadyRunning,
    SpawnCmd(io::Error),
    CouldntAwaitCmd(io::Error),
    CouldntReadCmdOutput(io::Error),
    CmdBadExit(String, Option<i32>),
    EmptyCommitMessage,
    NothingStaged,
    NoSuchPath(String),
    OpenLogFile(io::Error),
    PromptAborted,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(e) => f.write_fmt(format_args!("Configuration error: {}", e)),
            Error::ReadConfigFile(e) => {
                f.write_fmt(format_args!("Couldn't read config file: {}", e))
            }
            Error::CurrentDir(e) => {
                f.write_fmt(format_args!("Couldn't get current directory: {}", e))
            }
            Error::FileWatcher(e) => f.write_fmt(format_args!("File watcher error: {}", e)),
            Error::CmdAlreadyRunning => f.write_str("A command is already running"),
            Error::SpawnCmd(e) => f.write_fmt(format_args!("Failed to spawn command: {}", e)),
            Error::CouldntAwaitCmd(e) => f.write_fmt(format_args!("Couldn't await command: {}", e)),
            Error::CouldntReadCmdOutput(e) => {
                f.write_fmt(format_args!("Couldn't read command output: {}", e))
            }
            Error::CmdBadExit(args, code) => f.write_fmt(format_args!(
                "'{}' exited with code: {}",
                args,
                code.map(|c| c.to_string())
                    .unwrap_or_else(|| "".to_string())
            )),
            Error::EmptyCommitMessage => f.write_str("Please provide a commit message"),
            Error::NothingStaged => f.write_str("No staged changes to commit"),
            Error::NoSuchPath(path) => {
                f.write_fmt(format_args!("No status entry for path '{}'", path))
            }
            Error::OpenLogFile(e) => f.write_fmt(format_args!("Couldn't open log file: {}", e)),
            Error::PromptAborted => f.write_str("Aborted"),
        }
    }
}
