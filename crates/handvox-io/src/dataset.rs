use std::path::{Path, PathBuf};

/// Subject directories of the MSRA hand gesture dataset.
pub const SUBJECT_NAMES: [&str; 9] = ["P0", "P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"];

/// Gesture directories recorded for every subject.
pub const GESTURE_NAMES: [&str; 17] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "I", "IP", "L", "MP", "RP", "T", "TIP", "Y",
];

/// Error types for the dataset layout module.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Error accessing the dataset directory
    #[error("error accessing the dataset directory")]
    Io(#[from] std::io::Error),

    /// Expected dataset entry is missing
    #[error("missing dataset entry: {0}")]
    MissingData(PathBuf),
}

/// Directory layout of one copy of the MSRA hand gesture dataset.
///
/// The dataset root holds one directory per subject, each holding one
/// directory per gesture with the per-frame `%06d_depth.bin` files and the
/// gesture's `joint.txt` annotation.
#[derive(Debug, Clone)]
pub struct MsraDataset {
    root: PathBuf,
}

impl MsraDataset {
    /// Create a layout rooted at the dataset directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The dataset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory of one subject/gesture sequence.
    pub fn gesture_dir(&self, subject: &str, gesture: &str) -> PathBuf {
        self.root.join(subject).join(gesture)
    }

    /// The depth binary path of one frame within a gesture directory.
    pub fn depth_bin_path(gesture_dir: &Path, frame: usize) -> PathBuf {
        gesture_dir.join(format!("{:06}_depth.bin", frame))
    }

    /// The ground-truth annotation path within a gesture directory.
    pub fn joints_path(gesture_dir: &Path) -> PathBuf {
        gesture_dir.join("joint.txt")
    }

    /// The validity mask path within a gesture directory.
    pub fn valid_path(gesture_dir: &Path) -> PathBuf {
        gesture_dir.join("valid.txt")
    }

    /// Count the depth binary frames of a gesture directory.
    pub fn count_depth_frames(gesture_dir: &Path) -> Result<usize, DatasetError> {
        if !gesture_dir.is_dir() {
            return Err(DatasetError::MissingData(gesture_dir.to_path_buf()));
        }
        let mut count = 0;
        for entry in std::fs::read_dir(gesture_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "bin") {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Create a directory and its parents, succeeding when it already exists.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<(), DatasetError> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_paths_follow_msra_naming() {
        let dataset = MsraDataset::new("/data/msra");
        let gesture_dir = dataset.gesture_dir("P3", "IP");
        assert_eq!(gesture_dir, PathBuf::from("/data/msra/P3/IP"));
        assert_eq!(
            MsraDataset::depth_bin_path(&gesture_dir, 42),
            PathBuf::from("/data/msra/P3/IP/000042_depth.bin")
        );
        assert_eq!(
            MsraDataset::joints_path(&gesture_dir),
            PathBuf::from("/data/msra/P3/IP/joint.txt")
        );
    }

    #[test]
    fn counts_only_bin_entries() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        for frame in 0..3 {
            std::fs::write(
                MsraDataset::depth_bin_path(dir.path(), frame),
                b"placeholder",
            )?;
        }
        std::fs::write(dir.path().join("joint.txt"), "0\n")?;

        assert_eq!(MsraDataset::count_depth_frames(dir.path())?, 3);
        Ok(())
    }

    #[test]
    fn missing_gesture_dir_is_reported() {
        let result = MsraDataset::count_depth_frames(Path::new("/nonexistent/P0/1"));
        assert!(matches!(result, Err(DatasetError::MissingData(_))));
    }

    #[test]
    fn ensure_dir_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("results").join("P0").join("1");
        ensure_dir(&target)?;
        ensure_dir(&target)?;
        assert!(target.is_dir());
        Ok(())
    }
}
