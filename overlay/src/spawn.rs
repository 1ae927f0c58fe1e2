//! Renderer thread
//!
//! Drawing is CPU-heavy and blocking, so overlays live on a dedicated OS
//! thread and are driven through a command channel. Bursts of commands are
//! coalesced into a single render.

use std::thread::{self, JoinHandle};

use dclock_core::Layout;
use dclock_types::ClockAppearance;
use tokio::sync::mpsc::{self, Sender};

use crate::overlays::Overlay;

/// Capacity of the command channel
const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone)]
pub enum OverlayCommand {
    UpdateData(Layout),
    UpdateConfig(ClockAppearance),
    Shutdown,
}

/// Spawn `overlay` on its own thread.
///
/// `on_frame` runs after every render, typically to export the surface. The
/// thread exits on [`OverlayCommand::Shutdown`] or once every sender is
/// dropped, handing the overlay back through the join handle.
pub fn spawn_overlay<O, F>(mut overlay: O, mut on_frame: F) -> (Sender<OverlayCommand>, JoinHandle<O>)
where
    O: Overlay + Send + 'static,
    F: FnMut(&mut O) + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<OverlayCommand>(COMMAND_BUFFER);

    let handle = thread::spawn(move || {
        tracing::debug!("Renderer thread started");

        while let Some(first) = rx.blocking_recv() {
            let mut needs_render = false;
            let mut shutdown = false;

            // Process everything already queued before rendering once
            let mut next = Some(first);
            while let Some(cmd) = next {
                match cmd {
                    OverlayCommand::UpdateData(layout) => {
                        needs_render |= overlay.update_data(layout);
                    }
                    OverlayCommand::UpdateConfig(appearance) => {
                        overlay.update_config(appearance);
                        needs_render = true;
                    }
                    OverlayCommand::Shutdown => {
                        shutdown = true;
                        break;
                    }
                }
                next = rx.try_recv().ok();
            }

            if needs_render {
                overlay.render();
                on_frame(&mut overlay);
            }
            if shutdown {
                break;
            }
        }

        tracing::debug!("Renderer thread stopped");
        overlay
    });

    (tx, handle)
}
