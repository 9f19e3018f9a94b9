use depthcloud_3d::{CloudResolution, PinholeIntrinsics, PinholeProjector};
use depthcloud_engine::{CloudEngine, FrameSet};
use depthcloud_filters::{DecimationParams, PipelineConfig, SpatialParams, TemporalParams};
use depthcloud_image::{ColorFrame, DepthFrame, FrameSize};

fn projector(size: FrameSize) -> PinholeProjector {
    PinholeProjector::new(PinholeIntrinsics::new(
        size,
        (size.width as f32, size.width as f32),
        (size.width as f32 / 2.0, size.height as f32 / 2.0),
        0.001,
    ))
}

fn ramp_depth(size: FrameSize) -> DepthFrame {
    let data = (0..size.width * size.height)
        .map(|i| 800 + (i % size.width) as u16 * 10)
        .collect();
    DepthFrame::new(size, data).unwrap()
}

fn gradient_color(size: FrameSize) -> ColorFrame {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for y in 0..size.height {
        for x in 0..size.width {
            data.push((x * 255 / size.width.max(1)) as u8);
            data.push((y * 255 / size.height.max(1)) as u8);
            data.push(128);
        }
    }
    ColorFrame::new(size, data).unwrap()
}

#[test]
fn filtered_cycle_produces_a_decimated_cloud() {
    let size = FrameSize {
        width: 32,
        height: 16,
    };
    let config = PipelineConfig {
        decimation: Some(DecimationParams { magnitude: 2 }),
        spatial: Some(SpatialParams::default()),
        temporal: Some(TemporalParams::default()),
        ..PipelineConfig::default()
    }
    .with_disparity();

    let mut engine = CloudEngine::new(config, projector(size), CloudResolution::Full).unwrap();
    let depth = ramp_depth(size);
    let color = gradient_color(size);

    let updated = engine
        .update(&FrameSet {
            depth: Some(&depth),
            color: Some(&color),
        })
        .unwrap();

    assert!(updated);
    // the cleaned frame is half size in both axes, one point per pixel
    let cleaned = engine.depth_frame().unwrap();
    assert_eq!(cleaned.width(), 16);
    assert_eq!(cleaned.height(), 8);
    assert_eq!(engine.point_cloud().len(), 16 * 8);

    // every color channel came from the 8-bit source
    assert!(engine
        .point_cloud()
        .colors()
        .iter()
        .all(|c| c.iter().all(|&v| (0.0..=1.0).contains(&v))));
}

#[test]
fn resolution_change_takes_effect_on_the_next_cycle() {
    let size = FrameSize {
        width: 16,
        height: 8,
    };
    let mut engine = CloudEngine::new(
        PipelineConfig::default(),
        projector(size),
        CloudResolution::Full,
    )
    .unwrap();
    let depth = ramp_depth(size);
    let frames = FrameSet {
        depth: Some(&depth),
        color: None,
    };

    engine.update(&frames).unwrap();
    assert_eq!(engine.point_cloud().len(), 16 * 8);

    engine.set_resolution(CloudResolution::Half);
    engine.update(&frames).unwrap();
    assert_eq!(engine.point_cloud().len(), 8 * 4);

    engine.set_resolution(CloudResolution::Quarter);
    engine.update(&frames).unwrap();
    assert_eq!(engine.point_cloud().len(), 4 * 2);
}

#[test]
fn color_stream_dropout_switches_to_depth_shading() {
    let size = FrameSize {
        width: 8,
        height: 4,
    };
    let mut engine = CloudEngine::new(
        PipelineConfig::default(),
        projector(size),
        CloudResolution::Full,
    )
    .unwrap();
    let depth = ramp_depth(size);
    let color = gradient_color(size);

    engine
        .update(&FrameSet {
            depth: Some(&depth),
            color: Some(&color),
        })
        .unwrap();
    let colored = engine.point_cloud().colors().to_vec();

    engine
        .update(&FrameSet {
            depth: Some(&depth),
            color: None,
        })
        .unwrap();
    let shaded = engine.point_cloud().colors().to_vec();

    // depth shading is gray, the gradient was not
    assert_ne!(colored, shaded);
    assert!(shaded.iter().all(|c| c[0] == c[1] && c[1] == c[2]));

    // geometry is untouched by the color source
    engine
        .update(&FrameSet {
            depth: Some(&depth),
            color: Some(&color),
        })
        .unwrap();
    assert_eq!(engine.point_cloud().colors(), colored.as_slice());
}
