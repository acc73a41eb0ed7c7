use itertools::Itertools;
use std::{borrow::Cow, iter, process::Command};

/// Accumulated textual output of external commands, capped at a fixed
/// size. Once the cap is exceeded the oldest content is trimmed, always
/// leaving the tail intact.
pub struct OutputLog {
    text: String,
    cap: usize,
}

impl OutputLog {
    pub fn new(cap: usize) -> Self {
        Self {
            text: String::new(),
            cap,
        }
    }

    pub fn append(&mut self, out: &str) {
        self.text.push_str(out);
        if !out.ends_with('\n') {
            self.text.push('\n');
        }
        self.trim_to_cap();
    }

    pub fn push_line(&mut self, line: &str) {
        self.append(line);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn trim_to_cap(&mut self) {
        if self.text.len() <= self.cap {
            return;
        }

        // Trim on a char boundary at or past the overflow point.
        let mut cut = self.text.len() - self.cap;
        while !self.text.is_char_boundary(cut) {
            cut += 1;
        }
        self.text.replace_range(..cut, "");
    }
}

pub fn command_args(cmd: &Command) -> Cow<'static, str> {
    iter::once(cmd.get_program().to_string_lossy())
        .chain(cmd.get_args().map(|arg| arg.to_string_lossy()))
        .join(" ")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_below_cap_keeps_everything() {
        let mut log = OutputLog::new(100);
        log.append("hello\n");
        log.append("world");

        assert_eq!(log.text(), "hello\nworld\n");
    }

    #[test]
    fn overflow_trims_from_the_front() {
        let mut log = OutputLog::new(10);
        log.append("aaaa");
        log.append("bbbb");
        log.append("cccc");

        assert!(log.text().len() <= 10);
        assert!(log.text().ends_with("cccc\n"));
        assert!(!log.text().contains('a'));
    }

    #[test]
    fn trim_respects_char_boundaries() {
        let mut log = OutputLog::new(8);
        log.append("ちょっと長い");

        assert!(log.text().len() <= 8);
        assert!(log.text().chars().count() > 0);
    }

    #[test]
    fn command_args_joins_program_and_args() {
        let mut cmd = Command::new("git");
        cmd.args(["add", "Assets/Player.cs"]);

        assert_eq!(command_args(&cmd), "git add Assets/Player.cs");
    }
}
