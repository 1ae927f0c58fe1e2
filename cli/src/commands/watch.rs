//! Live mode
//!
//! The sampler publishes a frame per tick; whenever the ring layout changes
//! it is forwarded to the renderer thread, which rewrites the output file.

use std::thread::JoinHandle;
use std::time::Duration;

use dclock_core::{
    AppConfig, Layout, LocalClock, OffsetClock, RingGeometry, SamplerHandle, TimeSource,
    spawn_sampler,
};
use dclock_overlay::{
    ClockOverlay, OutputFormat, OverlayCommand, RasterFrame, SvgFrame, spawn_overlay,
};
use tokio::sync::mpsc::Sender;

use crate::cli::WatchArgs;
use crate::commands::output_format;
use crate::error::CliError;

pub async fn run(args: WatchArgs, config: AppConfig) -> Result<(), CliError> {
    let output = args
        .output
        .or_else(|| config.output_path.clone())
        .ok_or(CliError::MissingOutput)?;
    let format = output_format(args.format, &output);
    let interval = args
        .interval_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| config.sample_interval());

    let mut appearance = config.appearance;
    if let Some(size) = args.size {
        appearance.image_size = size;
    }
    let geometry = RingGeometry::from_appearance(&appearance)?;

    let source: Box<dyn TimeSource> = match args.offset {
        Some(offset) => Box::new(OffsetClock::new(LocalClock, offset)?),
        None => Box::new(LocalClock),
    };

    tracing::info!(
        path = %output.display(),
        %format,
        interval_ms = interval.as_millis() as u64,
        "Watching clock"
    );

    match format {
        OutputFormat::Png => {
            let frame = RasterFrame::new(appearance.image_size, appearance.glow.clone())?;
            let sink = output.clone();
            let (tx, renderer) = spawn_overlay(
                ClockOverlay::new(frame, appearance),
                move |overlay: &mut ClockOverlay<RasterFrame>| {
                    if let Err(e) = overlay.surface().save_png(&sink) {
                        tracing::error!(error = %e, "Failed to write frame");
                    }
                },
            );
            let sampler = spawn_sampler(source, interval, geometry);
            forward_frames(sampler, tx, args.frames).await;
            join_renderer(renderer).await?;
        }
        OutputFormat::Svg => {
            let frame = SvgFrame::new(appearance.glow.clone());
            let sink = output.clone();
            let (tx, renderer) = spawn_overlay(
                ClockOverlay::new(frame, appearance),
                move |overlay: &mut ClockOverlay<SvgFrame>| {
                    if let Err(e) = overlay.surface().save(&sink) {
                        tracing::error!(error = %e, "Failed to write frame");
                    }
                },
            );
            let sampler = spawn_sampler(source, interval, geometry);
            forward_frames(sampler, tx, args.frames).await;
            join_renderer(renderer).await?;
        }
    }

    tracing::info!(path = %output.display(), "Stopped watching");
    Ok(())
}

/// Push each distinct layout to the renderer until Ctrl-C, the frame limit,
/// or the renderer going away. Returns the number of layouts sent.
async fn forward_frames(
    sampler: SamplerHandle,
    tx: Sender<OverlayCommand>,
    max_frames: Option<u64>,
) -> u64 {
    let mut frames = sampler.subscribe();
    let mut last: Option<Layout> = None;
    let mut sent = 0u64;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        if max_frames.is_some_and(|max| sent >= max) {
            break;
        }

        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    tracing::warn!("Sampler stopped unexpectedly");
                    break;
                }
                let Some(frame) = frames.borrow_and_update().clone() else {
                    continue;
                };
                if last.as_ref() == Some(&frame.layout) {
                    continue;
                }

                tracing::debug!(
                    decimal_time = %frame.state.decimal_time(),
                    "Layout changed"
                );
                last = Some(frame.layout.clone());
                if tx.send(OverlayCommand::UpdateData(frame.layout)).await.is_err() {
                    tracing::warn!("Renderer thread is gone");
                    break;
                }
                sent += 1;
            }
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    let _ = tx.send(OverlayCommand::Shutdown).await;
    sampler.shutdown().await;
    sent
}

async fn join_renderer<O: Send + 'static>(renderer: JoinHandle<O>) -> Result<O, CliError> {
    tokio::task::spawn_blocking(move || renderer.join())
        .await
        .ok()
        .and_then(|joined| joined.ok())
        .ok_or(CliError::RendererPanicked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dclock_core::FixedTime;
    use dclock_overlay::Overlay;

    #[derive(Default)]
    struct Collect(Vec<Layout>);

    impl Overlay for Collect {
        fn update_data(&mut self, layout: Layout) -> bool {
            self.0.push(layout);
            true
        }
        fn update_config(&mut self, _appearance: dclock_types::ClockAppearance) {}
        fn render(&mut self) {}
    }

    #[tokio::test]
    async fn test_forward_frames_stops_at_limit() {
        let (tx, renderer) = spawn_overlay(Collect::default(), |_| {});
        let sampler = spawn_sampler(
            FixedTime(44_550.0),
            Duration::from_millis(5),
            RingGeometry::default(),
        );

        let sent = forward_frames(sampler, tx, Some(1)).await;
        assert_eq!(sent, 1);

        let collected = join_renderer(renderer).await.unwrap();
        assert_eq!(collected.0.len(), 1);
        assert_eq!(collected.0[0].lit().count(), 7);
    }

    #[tokio::test]
    async fn test_forward_frames_skips_identical_layouts() {
        let (tx, renderer) = spawn_overlay(Collect::default(), |_| {});
        let sampler = spawn_sampler(
            FixedTime(1_000.0),
            Duration::from_millis(2),
            RingGeometry::default(),
        );

        // A fixed time never changes the layout, so after the first frame
        // the loop keeps waiting for a second one that never comes
        let forward = tokio::spawn(forward_frames(sampler, tx, Some(2)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!forward.is_finished());
        forward.abort();

        let collected = join_renderer(renderer).await.unwrap();
        assert_eq!(collected.0.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_output() {
        let args = WatchArgs {
            output: None,
            format: None,
            size: None,
            interval_ms: None,
            frames: Some(1),
            offset: None,
        };
        assert!(matches!(
            run(args, AppConfig::default()).await,
            Err(CliError::MissingOutput)
        ));
    }

    #[tokio::test]
    async fn test_watch_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("live.svg");
        let args = WatchArgs {
            output: Some(output.clone()),
            format: None,
            size: Some(32),
            interval_ms: Some(5),
            frames: Some(1),
            offset: None,
        };
        run(args, AppConfig::default()).await.unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert_eq!(svg.matches("<circle").count(), 110 * 3);
    }
}
