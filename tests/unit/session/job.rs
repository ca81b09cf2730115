use std::sync::mpsc;

use super::*;
use crate::encode::{ffmpeg::is_ffmpeg_on_path, sink::InMemorySink};
use crate::render::pipeline::NoProgress;

fn write_png(path: &Path, w: u32, h: u32, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(w, h, image::Rgba(rgba))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("01.png"), 8, 6, [255, 0, 0, 255]);
    write_png(&dir.join("02.png"), 8, 6, [0, 255, 0, 255]);
    write_png(&dir.join("03.png"), 4, 4, [0, 0, 255, 255]);
    dir
}

fn config() -> SlideshowConfig {
    SlideshowConfig {
        transition: "crossfade".to_string(),
        transition_duration: 0.25,
        fps: 8,
        seed: Some(5),
        ..SlideshowConfig::new(0.5)
    }
}

#[test]
fn load_slides_skips_undecodable_files() {
    let dir = fixture_dir("unit_job_load");
    std::fs::write(dir.join("00.png"), b"broken").unwrap();

    let slides = load_slides(std::slice::from_ref(&dir)).unwrap();
    assert_eq!(slides.len(), 3);
    assert_eq!((slides[0].width, slides[0].height), (8, 6));
    assert!(slides[0].source.ends_with("01.png"));
}

#[test]
fn plan_uses_directory_order_and_seed() {
    let dir = fixture_dir("unit_job_plan");
    let timeline = plan(&[dir], &config()).unwrap();
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.seed(), 5);
    assert_eq!(timeline.junctions(), &[EffectKind::Crossfade, EffectKind::Crossfade]);
    assert_eq!((timeline.canvas().width, timeline.canvas().height), (8, 6));
}

#[test]
fn empty_input_is_a_configuration_error() {
    let dir = PathBuf::from("target").join("unit_job_empty");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    assert!(matches!(
        plan(&[dir], &config()),
        Err(SlidecastError::Configuration(_))
    ));
}

#[test]
fn run_with_sink_reports_the_render() {
    let dir = fixture_dir("unit_job_run");
    let job = SlideshowJob::new(vec![dir], config(), "target/unit_job_run/out.mp4");
    let mut sink = InMemorySink::new();
    let report = job.run_with_sink(&mut sink, &NoProgress).unwrap();

    assert_eq!(report.image_count, 3);
    assert_eq!(report.frame_count, 12);
    assert_eq!(report.duration_secs, 1.5);
    assert_eq!(report.seed, 5);
    assert_eq!(sink.frames.len(), 12);
    assert!(sink.ended);
}

#[test]
fn spawned_job_reports_progress_or_encode_failure() {
    let dir = fixture_dir("unit_job_spawn");
    let out = dir.join("out.mp4");
    let job = SlideshowJob::new(vec![dir], config(), out.clone());
    let (tx, rx) = mpsc::channel::<Progress>();
    let result = job.spawn(tx).unwrap().join().unwrap();
    let updates: Vec<Progress> = rx.iter().collect();

    if is_ffmpeg_on_path() {
        let report = result.unwrap();
        assert_eq!(report.frame_count, 12);
        assert_eq!(updates.last().map(|p| p.frames_done), Some(12));
        assert!(out.exists());
    } else {
        assert!(matches!(result, Err(SlidecastError::Encode(_))));
        assert!(updates.is_empty());
        assert!(!out.exists());
    }
}
