use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use handvox_3d::error::GeometryError;
use handvox_3d::frame::DepthFrame;

/// The largest bounding box a header may announce, in depth samples. The
/// MSRA sensor is 320x240, so no valid bounding box can hold more.
pub const MAX_SAMPLES: u64 = 320 * 240;

/// Error types for the depth binary module.
#[derive(Debug, thiserror::Error)]
pub enum DepthBinError {
    /// Failed to read or write the depth binary file
    #[error("Failed to read or write the depth binary file")]
    Io(#[from] std::io::Error),

    /// Invalid depth binary file extension
    #[error("Invalid depth binary file extension. Got: {0}")]
    InvalidFileExtension(String),

    /// Header announces more samples than the sensor can produce
    #[error("Header announces {0} depth samples, more than the {MAX_SAMPLES} sample cap")]
    OversizedHeader(u64),

    /// Header and depth payload disagree
    #[error("Header and depth payload disagree")]
    InvalidFrame(#[from] GeometryError),
}

/// Read a little-endian u32 from a reader
#[inline]
fn read_u32(reader: &mut impl Read) -> Result<u32, DepthBinError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Read an MSRA `*_depth.bin` frame file.
///
/// The file holds six little-endian u32 header fields (image width, image
/// height, then the left/top/right/bottom bounding box edges) followed by
/// `bbox_width * bbox_height` little-endian f32 depth samples covering the
/// bounding box row-major.
///
/// # Arguments
/// * `path` - Path to a `.bin` file.
///
/// # Returns
/// A validated [`DepthFrame`].
pub fn read_depth_bin(path: impl AsRef<Path>) -> Result<DepthFrame, DepthBinError> {
    let Some(file_ext) = path.as_ref().extension() else {
        return Err(DepthBinError::InvalidFileExtension("".into()));
    };
    if file_ext != "bin" {
        return Err(DepthBinError::InvalidFileExtension(
            file_ext.to_string_lossy().to_string(),
        ));
    }

    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);

    let image_width = read_u32(&mut reader)?;
    let image_height = read_u32(&mut reader)?;
    let bbox_left = read_u32(&mut reader)?;
    let bbox_top = read_u32(&mut reader)?;
    let bbox_right = read_u32(&mut reader)?;
    let bbox_bottom = read_u32(&mut reader)?;

    let num_samples = bbox_right.saturating_sub(bbox_left) as u64
        * bbox_bottom.saturating_sub(bbox_top) as u64;
    if num_samples > MAX_SAMPLES {
        return Err(DepthBinError::OversizedHeader(num_samples));
    }

    let mut payload = vec![0u8; num_samples as usize * 4];
    reader.read_exact(&mut payload)?;

    let depth = payload
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect::<Vec<_>>();

    Ok(DepthFrame::new(
        image_width,
        image_height,
        bbox_left,
        bbox_top,
        bbox_right,
        bbox_bottom,
        depth,
    )?)
}

/// Write a depth frame in the MSRA `*_depth.bin` layout.
///
/// The inverse of [`read_depth_bin`]; mainly useful for tests and fixture
/// generation.
pub fn write_depth_bin(path: impl AsRef<Path>, frame: &DepthFrame) -> Result<(), DepthBinError> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    for field in [
        frame.image_width,
        frame.image_height,
        frame.bbox_left,
        frame.bbox_top,
        frame.bbox_right,
        frame.bbox_bottom,
    ] {
        writer.write_all(&field.to_le_bytes())?;
    }
    for sample in frame.depth() {
        writer.write_all(&sample.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
