use argh::FromArgs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use handvox_3d::camera::PinholeIntrinsics;
use handvox_3d::ops::process_frame;
use handvox_3d::volume::{TSDF_CHANNELS, VOXEL_RESOLUTION};
use handvox_io::annotations::{read_joints_txt, read_valid_txt, JointSet, JOINT_COUNT};
use handvox_io::dataset::{ensure_dir, MsraDataset, GESTURE_NAMES, SUBJECT_NAMES};
use handvox_io::depth_bin::read_depth_bin;
use handvox_io::store::{write_arrays, NamedArray};

#[derive(FromArgs)]
/// Convert the MSRA hand gesture dataset into fixed-size point clouds and
/// projective TSDF volumes for training
struct Args {
    /// path to the dataset root (the directory holding P0..P8)
    #[argh(option)]
    dataset_path: PathBuf,

    /// path to write per-frame feature files to
    #[argh(option)]
    output_path: PathBuf,

    /// number of points per normalized cloud
    #[argh(option, default = "handvox_3d::resample::POINT_NUM")]
    point_num: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let dataset = MsraDataset::new(&args.dataset_path);
    let intrinsics = PinholeIntrinsics::msra();

    for subject in SUBJECT_NAMES {
        for gesture in GESTURE_NAMES {
            if let Err(err) = process_gesture(&dataset, &args, &intrinsics, subject, gesture) {
                log::error!("skipping {}/{}: {}", subject, gesture, err);
            }
        }
    }
    Ok(())
}

fn process_gesture(
    dataset: &MsraDataset,
    args: &Args,
    intrinsics: &PinholeIntrinsics,
    subject: &str,
    gesture: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let gesture_dir = dataset.gesture_dir(subject, gesture);
    let out_dir = args.output_path.join(subject).join(gesture);
    ensure_dir(&out_dir)?;

    let frame_count = MsraDataset::count_depth_frames(&gesture_dir)?;
    let joints = read_joints_txt(MsraDataset::joints_path(&gesture_dir))?;
    let valid = match read_valid_txt(MsraDataset::valid_path(&gesture_dir)) {
        Ok(mask) => mask,
        Err(err) => {
            log::warn!(
                "no validity mask for {}/{} ({}); keeping all frames",
                subject,
                gesture,
                err
            );
            vec![true; frame_count]
        }
    };
    log::info!("processing {}/{}: {} frames", subject, gesture, frame_count);

    // frames are independent; writes target disjoint output files
    (0..frame_count).into_par_iter().for_each(|frame_idx| {
        if !valid.get(frame_idx).copied().unwrap_or(false) {
            log::debug!("{}/{} frame {} marked invalid", subject, gesture, frame_idx);
            return;
        }
        if let Err(err) = process_one(
            &gesture_dir,
            &out_dir,
            frame_idx,
            &joints,
            intrinsics,
            args.point_num,
        ) {
            log::error!(
                "skipping {}/{} frame {}: {}",
                subject,
                gesture,
                frame_idx,
                err
            );
        }
    });
    Ok(())
}

fn process_one(
    gesture_dir: &Path,
    out_dir: &Path,
    frame_idx: usize,
    joints: &[JointSet],
    intrinsics: &PinholeIntrinsics,
    point_num: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = read_depth_bin(MsraDataset::depth_bin_path(gesture_dir, frame_idx))?;

    // seed per frame so reruns reproduce the same resampling draws
    let mut rng = StdRng::seed_from_u64(frame_idx as u64);
    let features = process_frame(&frame, intrinsics, point_num, &mut rng)?;

    let skeleton = joints
        .get(frame_idx)
        .ok_or("no ground truth for frame index")?;

    let arrays = [
        NamedArray::new(
            "points",
            vec![features.points.len(), 3],
            features.points.iter().flatten().copied().collect(),
        )?,
        NamedArray::new(
            "tsdf",
            vec![
                TSDF_CHANNELS,
                VOXEL_RESOLUTION,
                VOXEL_RESOLUTION,
                VOXEL_RESOLUTION,
            ],
            features.tsdf.as_slice().to_vec(),
        )?,
        NamedArray::new(
            "joints",
            vec![JOINT_COUNT, 3],
            skeleton.iter().flatten().copied().collect(),
        )?,
        NamedArray::new("max_length", vec![1], vec![features.max_length])?,
        NamedArray::new("mid_point", vec![3], features.mid_point.to_vec())?,
    ];
    write_arrays(out_dir.join(format!("{:06}.hvx", frame_idx)), &arrays)?;
    Ok(())
}
