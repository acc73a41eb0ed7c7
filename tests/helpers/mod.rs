use stagehand::{config::Config, engine::Engine};
use std::{env, fs, path::Path, process::Command, thread, time::Duration};
use temp_dir::TempDir;

pub struct TestContext {
    pub dir: TempDir,
    pub engine: Engine,
}

impl TestContext {
    pub fn setup_init() -> Self {
        let dir = TempDir::new().unwrap();

        set_env_vars();
        run(dir.path(), &["git", "init", "--initial-branch=main"]);
        set_config(dir.path());

        let engine = Engine::new(Config::default(), dir.path());

        Self { dir, engine }
    }

    /// Ticks the engine until it is idle with a fresh status.
    pub fn settle(&mut self) {
        for _ in 0..1000 {
            self.engine.tick().unwrap();

            if self.engine.is_ready() && !self.engine.is_dirty() {
                return;
            }

            thread::sleep(Duration::from_millis(5));
        }

        panic!("engine did not settle");
    }

    pub fn write_file(&self, name: &str, contents: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).expect("error writing to file");
    }
}

fn set_env_vars() {
    unsafe {
        env::set_var("GIT_CONFIG_GLOBAL", "/dev/null");
        env::set_var("GIT_CONFIG_SYSTEM", "/dev/null");
    }
}

fn set_config(path: &Path) {
    run(path, &["git", "config", "user.email", "ci@example.com"]);
    run(path, &["git", "config", "user.name", "CI"]);
}

pub fn commit(dir: &Path, file_name: &str, contents: &str) {
    fs::write(dir.join(file_name), contents).expect("error writing to file");
    run(dir, &["git", "add", file_name]);
    run(dir, &["git", "commit", "-m", &format!("add {}", file_name)]);
}

pub fn run(dir: &Path, cmd: &[&str]) {
    Command::new(cmd[0])
        .args(&cmd[1..])
        .current_dir(dir)
        .output()
        .unwrap_or_else(|_| panic!("failed to execute {:?}", cmd));
}
