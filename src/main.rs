use clap::Parser;
use stagehand::{
    cli::{self, Commands},
    config,
    engine::Engine,
    error::Error,
    file_watcher::FileWatcher,
    refresh::RefreshState,
    status::FileEntry,
    Res,
};
use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

fn main() {
    let args = cli::Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &cli::Args) -> Res<()> {
    if args.log {
        simple_logging::log_to_file("stagehand.log", log::LevelFilter::Debug)
            .map_err(Error::OpenLogFile)?;
    }

    let config = config::init_config()?;
    let tick = Duration::from_millis(config.general.tick_interval_ms);
    let workdir = std::env::current_dir().map_err(Error::CurrentDir)?;
    let mut engine = Engine::new(config, &workdir);

    match &args.command {
        None | Some(Commands::Status) => {
            settle(&mut engine, tick)?;
            print_status(&engine);
        }
        Some(Commands::Stage { paths }) => {
            settle(&mut engine, tick)?;
            let entries = resolve(&engine, paths)?;
            engine.stage(&entries)?;
            settle(&mut engine, tick)?;
            print_status(&engine);
        }
        Some(Commands::Unstage { paths }) => {
            settle(&mut engine, tick)?;
            let entries = resolve(&engine, paths)?;
            engine.unstage(&entries)?;
            settle(&mut engine, tick)?;
            print_status(&engine);
        }
        Some(Commands::Diff { paths }) => {
            settle(&mut engine, tick)?;
            let entries = resolve(&engine, paths)?;
            engine.diff(&entries)?;
            settle(&mut engine, tick)?;
        }
        Some(Commands::Discard { paths, yes }) => {
            settle(&mut engine, tick)?;
            let entries = resolve(&engine, paths)?;

            if !yes {
                confirm_discard(&entries)?;
            }

            engine.discard(&entries)?;
            settle(&mut engine, tick)?;
            print_status(&engine);
        }
        Some(Commands::Commit { message }) => {
            settle(&mut engine, tick)?;
            engine.commit(message)?;
            settle(&mut engine, tick)?;
            print_status(&engine);
        }
        Some(Commands::Watch) => {
            watch(&mut engine, tick)?;
        }
    }

    if !engine.log_text().is_empty() {
        eprint!("{}", engine.log_text());
    }

    Ok(())
}

/// Ticks the engine until it is idle with a fresh status.
fn settle(engine: &mut Engine, tick: Duration) -> Res<()> {
    loop {
        engine.tick()?;

        if engine.is_ready() && !engine.is_dirty() {
            return Ok(());
        }

        thread::sleep(tick);
    }
}

fn resolve(engine: &Engine, paths: &[String]) -> Res<Vec<FileEntry>> {
    paths
        .iter()
        .map(|path| {
            engine
                .entry(path)
                .cloned()
                .ok_or_else(|| Error::NoSuchPath(path.clone()))
        })
        .collect()
}

fn print_status(engine: &Engine) {
    for entry in engine.files() {
        println!(
            "{}{} {}",
            entry.status_code[0], entry.status_code[1], entry.path
        );
    }
}

fn confirm_discard(entries: &[FileEntry]) -> Res<()> {
    print!("Really discard changes to {} file(s)? [y/N] ", entries.len());
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).ok();

    if answer.trim() == "y" {
        Ok(())
    } else {
        Err(Error::PromptAborted)
    }
}

fn watch(engine: &mut Engine, tick: Duration) -> Res<()> {
    let watcher = if engine.config().general.refresh_on_file_change {
        Some(FileWatcher::new(engine.workdir())?)
    } else {
        None
    };

    let mut was_refreshing = false;

    loop {
        if let Some(watcher) = &watcher {
            if watcher.pending_updates() {
                engine.notify_content_changed();
            }
        }

        if let Err(e) = engine.tick() {
            eprintln!("Error: {}", e);
        }

        let refreshing = engine.refresh_state() == RefreshState::Refreshing;
        if was_refreshing && !refreshing {
            print_status(engine);
            println!();
        }
        was_refreshing = refreshing;

        thread::sleep(tick);
    }
}
