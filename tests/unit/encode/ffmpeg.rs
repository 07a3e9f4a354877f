use super::*;

use crate::foundation::core::Fps;

fn sink_cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(10, 1).unwrap(),
    }
}

fn blank(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![0; (width * height * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn options_builder() {
    let o = Mp4Options::new("target/unit_ffmpeg/a.mp4")
        .background([0, 0, 0, 255])
        .overwrite(false);
    assert_eq!(o.out_path, PathBuf::from("target/unit_ffmpeg/a.mp4"));
    assert_eq!(o.background, [0, 0, 0, 255]);
    assert!(!o.overwrite);
    assert!(Mp4Options::new("x.mp4").overwrite);
}

#[test]
fn begin_rejects_bad_sizes_before_spawning() {
    let mut sink = FfmpegSink::new(Mp4Options::new("target/unit_ffmpeg/never.mp4"));
    assert!(sink.begin(sink_cfg(0, 10)).is_err());
    assert!(sink.begin(sink_cfg(11, 10)).is_err());
    assert!(sink.begin(sink_cfg(10, 7)).is_err());
    assert!(sink.encoder.is_none());
}

#[test]
fn begin_refuses_existing_file_without_overwrite() {
    let out = PathBuf::from("target/unit_ffmpeg/existing.mp4");
    ensure_parent_dir(&out).unwrap();
    std::fs::write(&out, b"x").unwrap();

    let mut sink = FfmpegSink::new(Mp4Options::new(&out).overwrite(false));
    let err = sink.begin(sink_cfg(4, 4)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert!(sink.encoder.is_none());
}

#[test]
fn sink_requires_begin() {
    let mut sink = FfmpegSink::new(Mp4Options::new("target/unit_ffmpeg/never.mp4"));
    assert!(sink.push_frame(FrameIndex(0), &blank(2, 2)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn frame_indices_must_increase() {
    assert_eq!(next_in_order(None, FrameIndex(3)).unwrap(), FrameIndex(3));
    assert_eq!(
        next_in_order(Some(FrameIndex(3)), FrameIndex(4)).unwrap(),
        FrameIndex(4)
    );
    assert!(next_in_order(Some(FrameIndex(3)), FrameIndex(3)).is_err());
    assert!(next_in_order(Some(FrameIndex(3)), FrameIndex(1)).is_err());
}

#[test]
fn flatten_premul_over_white() {
    // Premultiplied red @ 50% alpha over white.
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![255, 127, 127, 255]);
}

#[test]
fn flatten_straight_over_black() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

// A child that fills its stderr pipe before reading stdin only finishes if stderr is drained.
#[cfg(unix)]
#[test]
fn encoder_drains_a_chatty_stderr() {
    let mut cmd = Command::new("sh");
    cmd.args([
        "-c",
        "head -c 262144 /dev/zero >&2; cat > /dev/null; echo done >&2",
    ]);
    let mut enc = EncoderProcess::spawn(cmd).unwrap();
    let chunk = vec![7u8; 64 * 1024];
    for _ in 0..16 {
        enc.write(&chunk).unwrap();
    }
    enc.finish().unwrap();
}

#[cfg(unix)]
#[test]
fn encoder_failure_reports_stderr() {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", "cat > /dev/null; echo bad input >&2; exit 3"]);
    let mut enc = EncoderProcess::spawn(cmd).unwrap();
    enc.write(&[1, 2, 3]).unwrap();
    let err = enc.finish().unwrap_err().to_string();
    assert!(err.contains("bad input"), "{err}");
}

#[cfg(unix)]
#[test]
fn dropping_an_unfinished_encoder_kills_the_child() {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", "exec sleep 30"]);
    let enc = EncoderProcess::spawn(cmd).unwrap();
    let started = std::time::Instant::now();
    drop(enc);
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}

#[test]
fn out_of_order_push_is_rejected_when_ffmpeg_runs() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let mut sink = FfmpegSink::new(Mp4Options::new("target/unit_ffmpeg/order.mp4"));
    sink.begin(sink_cfg(16, 16)).unwrap();
    sink.push_frame(FrameIndex(1), &blank(16, 16)).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &blank(16, 16)).is_err());
    assert!(sink.push_frame(FrameIndex(2), &blank(2, 2)).is_err());
    sink.end().unwrap();
}
