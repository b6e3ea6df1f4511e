//! Config file change detection using the `notify` crate.

use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::AppMessage;

/// Spawn a watcher that posts [`AppMessage::ConfigChanged`] whenever the
/// config file is created, modified, or removed.
///
/// The parent directory is watched so that editors which replace the file
/// atomically are still seen. Returns `None` when the directory does not
/// exist or the platform watcher cannot be created; the viewer then runs
/// without live reload.
///
/// The returned watcher MUST be kept alive, dropping it stops watching.
pub fn spawn_config_watcher(
    config_path: &Path,
    message_tx: mpsc::UnboundedSender<AppMessage>,
) -> Option<RecommendedWatcher> {
    let dir = config_path.parent()?.to_path_buf();
    if !dir.is_dir() {
        debug!("Config directory {} does not exist, not watching", dir.display());
        return None;
    }

    let target = config_path.to_path_buf();
    let handler = move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if is_relevant(&event, &target) {
                let _ = message_tx.send(AppMessage::ConfigChanged);
            }
        }
        Err(e) => warn!("Config watcher error: {}", e),
    };

    let mut watcher = match RecommendedWatcher::new(handler, Config::default()) {
        Ok(watcher) => watcher,
        Err(e) => {
            warn!("Failed to create config watcher: {}", e);
            return None;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("Failed to watch {}: {}", dir.display(), e);
        return None;
    }

    info!("Watching {} for config changes", config_path.display());
    Some(watcher)
}

fn is_relevant(event: &Event, target: &PathBuf) -> bool {
    let kind_matters = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    kind_matters
        && event
            .paths
            .iter()
            .any(|path| path == target || path.file_name() == target.file_name())
}
