//! Replay a scroll script through the mounted pipeline.

use std::path::PathBuf;
use std::time::Duration;

use cinescroll_common::config::AppConfig;
use cinescroll_scene::{MountedOverlay, Overlay, SceneGraph};
use cinescroll_scroll_core::experience::{Experience, ExperienceOptions, FrameReport};
use cinescroll_scroll_core::frame_loop::FrameLoop;
use cinescroll_scroll_core::input::ScrollEventHub;
use cinescroll_story_model::scroll::parse_scroll_events;

use super::{describe_source, load_story};
use crate::OutputFormat;

pub async fn run(
    config: &AppConfig,
    path: Option<PathBuf>,
    input: PathBuf,
    fps: u32,
    tail_secs: f64,
    realtime: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("Frame rate must be positive");
    }
    let story = load_story(path.as_deref())?;
    let content = std::fs::read_to_string(&input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let mut events = parse_scroll_events(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", input.display()))?;
    events.sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));

    let frame_ms = 1000.0 / f64::from(fps);
    let last_event_ms = events.last().map(|e| e.timestamp_ms).unwrap_or(0.0);
    let end_ms = last_event_ms + tail_secs.max(0.0) * 1000.0;
    let frame_count = (end_ms / frame_ms).ceil() as u64 + 1;

    let frame_loop = FrameLoop::new();
    let hub = ScrollEventHub::new();
    let scene = SceneGraph::for_story(&story)?;
    let options = ExperienceOptions::from_config(config, &story);
    let mut mount = Experience::new(story)
        .with_options(options)
        .with_scene(scene)
        .mount(&frame_loop, &hub)?;
    let overlay = MountedOverlay::attach(Overlay::five_act(), &mount);

    tracing::info!(
        source = %describe_source(&path),
        events = events.len(),
        frames = frame_count,
        fps,
        realtime,
        "Simulation started"
    );

    let mut interval = realtime.then(|| {
        let mut interval = tokio::time::interval(Duration::from_secs_f64(frame_ms / 1000.0));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval
    });

    let mut pending = events.into_iter().peekable();
    let mut act_changes = 0usize;
    for frame in 0..frame_count {
        if let Some(interval) = interval.as_mut() {
            interval.tick().await;
        }
        let time_ms = frame as f64 * frame_ms;
        while let Some(event) = pending.next_if(|e| e.timestamp_ms <= time_ms) {
            hub.dispatch(event);
        }
        frame_loop.tick(time_ms);

        let Some(report) = mount.last_report() else {
            continue;
        };
        if report.act_change.is_some() {
            act_changes += 1;
        }
        emit(&report, &overlay, format)?;
    }

    let final_report = mount.last_report();
    mount.teardown();

    if format == OutputFormat::Text {
        println!();
        println!("Simulated {frame_count} frames at {fps}fps");
        println!("  Act changes: {act_changes}");
        if let Some(report) = final_report {
            println!(
                "  Final: offset {:.1}px, progress {}, {}",
                report.scroll.smoothed_offset, report.progress, report.act
            );
            let p = report.camera.position;
            println!("  Camera: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        }
        println!(
            "  After teardown: {} frame callbacks, {} scroll listeners",
            frame_loop.callback_count(),
            hub.listener_count()
        );
    }

    Ok(())
}

fn emit(report: &FrameReport, overlay: &MountedOverlay, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(report)?),
        OutputFormat::Text => {
            if let Some(change) = report.act_change {
                let headline = overlay
                    .current()
                    .map(|copy| copy.headlines.join(" / "))
                    .unwrap_or_default();
                println!(
                    "[{:>8.1}ms] {} -> {} at progress {}  {}",
                    report.time_ms, change.from, change.to, change.progress, headline
                );
            }
        }
    }
    Ok(())
}
