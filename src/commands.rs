use crate::{
    config::{Config, ProjectConfig},
    status::FileEntry,
};
use itertools::Itertools;
use std::process::Command;

/// Paths a single entry contributes to an invocation. Sidecar metadata
/// files travel with their primary file in both directions so the pair
/// is staged or reset atomically in one invocation.
pub fn target_paths(entry: &FileEntry, project: &ProjectConfig) -> Vec<String> {
    if entry.is_sidecar {
        let primary = entry
            .path
            .strip_suffix(&project.sidecar_suffix)
            .unwrap_or(&entry.path);
        vec![entry.path.clone(), primary.to_string()]
    } else if entry.is_project_file {
        let sidecar = format!("{}{}", entry.path, project.sidecar_suffix);
        vec![entry.path.clone(), sidecar]
    } else {
        vec![entry.path.clone()]
    }
}

/// All target paths for a batch, deduplicated with order preserved, so a
/// whole selection becomes one invocation.
pub fn paths_for(entries: &[FileEntry], project: &ProjectConfig) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| target_paths(entry, project))
        .unique()
        .collect()
}

fn git(config: &Config) -> Command {
    Command::new(&config.general.git_executable)
}

pub fn status_query_cmd(config: &Config) -> Command {
    let mut cmd = git(config);
    cmd.args(["status", "--porcelain", "--ignored"]);
    cmd
}

pub fn stage_cmd(config: &Config, paths: &[String]) -> Command {
    let mut cmd = git(config);
    cmd.arg("add");
    cmd.args(paths);
    cmd
}

pub fn stage_all_cmd(config: &Config) -> Command {
    let mut cmd = git(config);
    cmd.args(["add", "."]);
    cmd
}

pub fn unstage_cmd(config: &Config, paths: &[String]) -> Command {
    let mut cmd = git(config);
    cmd.args(["reset", "--"]);
    cmd.args(paths);
    cmd
}

pub fn unstage_all_cmd(config: &Config) -> Command {
    let mut cmd = git(config);
    cmd.args(["reset", "."]);
    cmd
}

pub fn diff_cmd(config: &Config, paths: &[String]) -> Command {
    let mut cmd = git(config);
    cmd.args(["difftool", "--no-prompt", "HEAD"]);
    cmd.args(paths);
    cmd
}

pub fn discard_cmd(config: &Config, paths: &[String]) -> Command {
    let mut cmd = git(config);
    cmd.args(["checkout", "--"]);
    cmd.args(paths);
    cmd
}

pub fn commit_cmd(config: &Config, message: &str) -> Command {
    let mut cmd = git(config);
    cmd.args(["commit", "-m", message]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_log::command_args;
    use crate::status::parse_status_line;
    use pretty_assertions::assert_eq;

    fn project() -> ProjectConfig {
        ProjectConfig {
            root_marker: "Assets".to_string(),
            sidecar_suffix: ".meta".to_string(),
        }
    }

    fn entry(line: &str) -> FileEntry {
        parse_status_line(line, &project()).unwrap()
    }

    #[test]
    fn project_file_is_paired_with_its_sidecar() {
        let paths = target_paths(&entry("A  Assets/Player.cs"), &project());
        assert_eq!(paths, vec!["Assets/Player.cs", "Assets/Player.cs.meta"]);
    }

    #[test]
    fn sidecar_is_paired_with_its_primary() {
        let paths = target_paths(&entry("?? Assets/Player.cs.meta"), &project());
        assert_eq!(paths, vec!["Assets/Player.cs.meta", "Assets/Player.cs"]);
    }

    #[test]
    fn file_outside_project_root_stands_alone() {
        let paths = target_paths(&entry("?? README.md"), &project());
        assert_eq!(paths, vec!["README.md"]);
    }

    #[test]
    fn batch_builds_one_deduplicated_path_list() {
        let entries = vec![
            entry("A  Assets/Player.cs"),
            entry("A  Assets/Player.cs.meta"),
            entry("?? README.md"),
        ];

        let paths = paths_for(&entries, &project());
        assert_eq!(
            paths,
            vec!["Assets/Player.cs", "Assets/Player.cs.meta", "README.md"]
        );
    }

    #[test]
    fn stage_builds_a_single_invocation() {
        let config = Config::default();
        let paths = paths_for(&[entry("A  Assets/Player.cs")], &project());
        let cmd = stage_cmd(&config, &paths);

        assert_eq!(
            command_args(&cmd),
            "git add Assets/Player.cs Assets/Player.cs.meta"
        );
    }

    #[test]
    fn status_query_requests_porcelain_with_ignored() {
        let cmd = status_query_cmd(&Config::default());
        assert_eq!(command_args(&cmd), "git status --porcelain --ignored");
    }

    #[test]
    fn command_shapes() {
        let config = Config::default();
        let paths = vec!["a.txt".to_string()];

        assert_eq!(
            command_args(&unstage_cmd(&config, &paths)),
            "git reset -- a.txt"
        );
        assert_eq!(
            command_args(&diff_cmd(&config, &paths)),
            "git difftool --no-prompt HEAD a.txt"
        );
        assert_eq!(
            command_args(&discard_cmd(&config, &paths)),
            "git checkout -- a.txt"
        );
        assert_eq!(
            command_args(&commit_cmd(&config, "a message")),
            "git commit -m a message"
        );
        assert_eq!(command_args(&stage_all_cmd(&config)), "git add .");
        assert_eq!(command_args(&unstage_all_cmd(&config)), "git reset .");
    }
}
