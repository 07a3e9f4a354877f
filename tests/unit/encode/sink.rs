use super::*;

fn frame(w: u32, h: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_records_config_and_frames() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    };
    sink.begin(cfg).unwrap();
    sink.push_frame(FrameIndex(0), &frame(2, 2, [0, 0, 0, 0]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &frame(2, 2, [9, 9, 9, 255]))
        .unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, FrameIndex(1));
    assert!(sink.is_ended());
}

#[test]
fn png_sequence_names_frames_by_index() {
    let dir = PathBuf::from("target").join("unit_png_sequence");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir, "dots");
    sink.begin(SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(7), &frame(4, 2, [255, 0, 0, 255]))
        .unwrap();
    sink.end().unwrap();

    let expected = dir.join("dots_00007.png");
    assert_eq!(sink.written(), &[expected.clone()]);
    let img = image::open(&expected).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(3, 1).0, [255, 0, 0, 255]);
}
