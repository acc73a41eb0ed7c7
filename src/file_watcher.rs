use crate::{error::Error, Res};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// Watches the project directory and flags pending updates for the host
/// to drain on its next tick. Changes inside `.git` are ignored to avoid
/// refresh loops from the tool's own writes.
pub struct FileWatcher {
    pending_updates: Arc<AtomicBool>,
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    pub fn new(root: &Path) -> Res<Self> {
        let pending_updates = Arc::new(AtomicBool::new(false));
        let pending_updates_w = Arc::clone(&pending_updates);

        let mut watcher =
            notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if !is_changed(&event) {
                        return;
                    }

                    for path in &event.paths {
                        if path.components().any(|c| c.as_os_str() == ".git") {
                            continue;
                        }

                        log::info!("File changed: {:?} ({:?})", path, event.kind);
                        pending_updates_w.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            })
            .map_err(Error::FileWatcher)?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(Error::FileWatcher)?;

        log::info!(
            "File watcher started (kind: {:?})",
            RecommendedWatcher::kind()
        );

        Ok(Self {
            pending_updates,
            _watcher: watcher,
        })
    }

    /// Returns true once per batch of changes, clearing the flag.
    pub fn pending_updates(&self) -> bool {
        self.pending_updates.swap(false, Ordering::Relaxed)
    }
}

fn is_changed(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}
