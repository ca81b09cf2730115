use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_reversed_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
}

#[test]
fn fps_frame_timestamps() {
    let fps = Fps::integer(24).unwrap();
    assert_eq!(fps.frame_to_secs(FrameIndex(0)), 0.0);
    assert_eq!(fps.frame_to_secs(FrameIndex(120)), 5.0);
    assert_eq!(fps.secs_to_frames_floor(15.0), 360);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.secs_to_frames_floor(1.0), 29);
}

#[test]
fn frame_count_survives_decimal_durations() {
    let fps = Fps::integer(10).unwrap();
    assert!(3.0 * 0.7 * 10.0 < 21.0);
    assert_eq!(fps.secs_to_frames_floor(3.0 * 0.7), 21);
    assert_eq!(fps.secs_to_frames_floor(2.05), 20);
}

#[test]
fn canvas_center_and_bytes() {
    let c = Canvas::new(640, 360).unwrap();
    assert_eq!(c.center(), Vec2::new(320.0, 180.0));
    assert_eq!(c.byte_len(), 640 * 360 * 4);
    assert!(Canvas::new(0, 10).is_err());
}
