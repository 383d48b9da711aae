use argh::FromArgs;
use std::path::PathBuf;

use handvox_io::store::read_arrays;

#[derive(FromArgs)]
/// Render the point cloud of a preprocessed frame file as a 3D scatter
struct Args {
    /// path to a per-frame feature file written by the preprocess demo
    #[argh(option)]
    frame_path: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    let arrays = read_arrays(&args.frame_path)?;
    let points = arrays
        .iter()
        .find(|array| array.name == "points")
        .ok_or("frame file holds no `points` array")?;

    let positions = points
        .data
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect::<Vec<_>>();

    let rec = rerun::RecordingStreamBuilder::new("Handvox Point Viewer").spawn()?;
    rec.log("/", &rerun::ViewCoordinates::RIGHT_HAND_Y_DOWN())?;
    rec.log("hand", &rerun::Points3D::new(positions))?;

    Ok(())
}
