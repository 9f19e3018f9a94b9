use argh::FromArgs;

use depthcloud::d3::{CloudResolution, PinholeIntrinsics, PinholeProjector};
use depthcloud::engine::{CloudEngine, FrameSet};
use depthcloud::filters::{
    DecimationParams, PipelineConfig, SpatialParams, TemporalParams,
};
use depthcloud::image::{ColorFrame, DepthFrame, FrameSize};

#[derive(FromArgs)]
/// Drive the point cloud engine on synthetic frames
struct Args {
    /// depth stream width in pixels
    #[argh(option, default = "640")]
    width: usize,

    /// depth stream height in pixels
    #[argh(option, default = "480")]
    height: usize,

    /// number of frames to process
    #[argh(option, default = "30")]
    frames: usize,

    /// point cloud stride: 1, 2 or 4
    #[argh(option, default = "2")]
    step: usize,

    /// drop the color stream to exercise depth shading
    #[argh(switch)]
    no_color: bool,
}

/// A slanted wall with a bit of per-frame wobble, in sensor units.
fn synth_depth(size: FrameSize, tick: usize) -> DepthFrame {
    let mut data = Vec::with_capacity(size.width * size.height);
    for y in 0..size.height {
        for x in 0..size.width {
            let base = 800 + (x / 4) as u16;
            let wobble = ((x + y + tick) % 5) as u16;
            // punch a few holes so the filters have something to do
            let d = if (x * 7 + y * 13 + tick) % 97 == 0 {
                0
            } else {
                base + wobble
            };
            data.push(d);
        }
    }
    DepthFrame::new(size, data).expect("sized to match")
}

fn synth_color(size: FrameSize) -> ColorFrame {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for y in 0..size.height {
        for x in 0..size.width {
            data.push((x * 255 / size.width) as u8);
            data.push((y * 255 / size.height) as u8);
            data.push(96);
        }
    }
    ColorFrame::new(size, data).expect("sized to match")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let size = FrameSize {
        width: args.width,
        height: args.height,
    };
    let resolution = match args.step {
        1 => CloudResolution::Full,
        2 => CloudResolution::Half,
        4 => CloudResolution::Quarter,
        other => return Err(format!("Invalid step: {}", other).into()),
    };

    let config = PipelineConfig {
        decimation: Some(DecimationParams { magnitude: 2 }),
        spatial: Some(SpatialParams::default()),
        temporal: Some(TemporalParams::default()),
        ..PipelineConfig::default()
    }
    .with_disparity();

    let projector = PinholeProjector::new(PinholeIntrinsics::new(
        size,
        (0.9 * size.width as f32, 0.9 * size.width as f32),
        (size.width as f32 / 2.0, size.height as f32 / 2.0),
        0.001,
    ));

    let mut engine = CloudEngine::new(config, projector, resolution)?;
    let color = synth_color(size);

    for tick in 0..args.frames {
        let depth = synth_depth(size, tick);
        let frames = FrameSet {
            depth: Some(&depth),
            color: (!args.no_color).then_some(&color),
        };

        if engine.update(&frames)? {
            let cloud = engine.point_cloud();
            let valid = cloud.points().iter().filter(|p| p.z > 0.0).count();
            log::info!(
                "frame {}: {} points ({} with valid depth)",
                tick,
                cloud.len(),
                valid
            );
        } else {
            log::info!("frame {}: no depth frame, keeping the previous cloud", tick);
        }
    }

    let cleaned = engine.depth_frame().ok_or("no frame was processed")?;
    println!(
        "processed {} frames; cleaned depth {} -> {} points",
        args.frames,
        cleaned.size(),
        engine.point_cloud().len()
    );

    Ok(())
}
