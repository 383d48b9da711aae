use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of annotated joints per hand skeleton.
pub const JOINT_COUNT: usize = 21;

/// One ground-truth hand skeleton: 21 joints in camera millimeters.
pub type JointSet = [[f32; 3]; JOINT_COUNT];

/// Error types for the annotation parsers.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    /// Error reading the annotation file
    #[error("error reading the annotation file")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error {0}")]
    ParseError(String),

    /// Frame count in the header does not match the body
    #[error("Expected {0} annotated frames, found {1}")]
    FrameCountMismatch(usize, usize),
}

fn parse_part<T: std::str::FromStr>(s: &str) -> Result<T, AnnotationError>
where
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| AnnotationError::ParseError(format!("{}: {}", s, e)))
}

/// Read a per-gesture `joint.txt` ground-truth file.
///
/// The first line holds the frame count; each following line holds 63
/// whitespace-separated floats, three per joint. The raw annotation stores z
/// with the opposite sign to reconstructed depth, so z is negated on read to
/// the positive-toward-camera convention.
///
/// # Arguments
///
/// * `path` - The path to the joint.txt file.
///
/// # Returns
///
/// One [`JointSet`] per annotated frame, in frame order.
pub fn read_joints_txt(path: impl AsRef<Path>) -> Result<Vec<JointSet>, AnnotationError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| AnnotationError::ParseError("empty joint file".to_string()))??;
    let frame_count: usize = parse_part(header.trim())?;

    let joints = lines
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| -> Result<JointSet, AnnotationError> {
            let line = line.map_err(AnnotationError::from)?;
            parse_joint_line(&line)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if joints.len() != frame_count {
        return Err(AnnotationError::FrameCountMismatch(frame_count, joints.len()));
    }
    Ok(joints)
}

/// Parse one line of 63 floats into a skeleton, negating z.
fn parse_joint_line(line: &str) -> Result<JointSet, AnnotationError> {
    let values = line
        .split_whitespace()
        .map(parse_part::<f32>)
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != JOINT_COUNT * 3 {
        return Err(AnnotationError::ParseError(format!(
            "expected {} values per frame, got {}",
            JOINT_COUNT * 3,
            values.len()
        )));
    }

    let mut joints = [[0.0f32; 3]; JOINT_COUNT];
    for (joint, triple) in joints.iter_mut().zip(values.chunks_exact(3)) {
        *joint = [triple[0], triple[1], -triple[2]];
    }
    Ok(joints)
}

/// Read a validity mask file: one whitespace-separated `0`/`1` token per
/// frame of the gesture sequence.
pub fn read_valid_txt(path: impl AsRef<Path>) -> Result<Vec<bool>, AnnotationError> {
    let content = std::fs::read_to_string(path)?;
    content
        .split_whitespace()
        .map(|token| match token {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(AnnotationError::ParseError(format!(
                "expected 0 or 1, got {}",
                other
            ))),
        })
        .collect()
}
