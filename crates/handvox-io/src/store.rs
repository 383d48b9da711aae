use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: &str = "HANDVOX";
const VERSION: u32 = 1;
const MAX_ARRAYS: usize = 64;
const MAX_ELEMENTS: usize = 50_000_000;

/// Error types for the array store module.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read or write the store file
    #[error("Failed to read or write the store file")]
    Io(#[from] std::io::Error),

    /// Malformed store header
    #[error("Malformed store header")]
    MalformedHeader,

    /// Unsupported store version
    #[error("Unsupported store version {0}")]
    UnsupportedVersion(u32),

    /// Array shape does not match its data length
    #[error("Array `{0}` shape implies {1} elements, data holds {2}")]
    ShapeMismatch(String, usize, usize),
}

/// A named float32 array with an explicit shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArray {
    /// The array name, unique within one store file.
    pub name: String,
    /// Row-major dimensions; their product is the element count.
    pub shape: Vec<usize>,
    /// The elements in row-major order.
    pub data: Vec<f32>,
}

impl NamedArray {
    /// Create a named array, validating data length against the shape.
    pub fn new(
        name: impl Into<String>,
        shape: Vec<usize>,
        data: Vec<f32>,
    ) -> Result<Self, StoreError> {
        let name = name.into();
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(StoreError::ShapeMismatch(name, expected, data.len()));
        }
        Ok(Self { name, shape, data })
    }
}

/// Write named float32 arrays to a store file.
///
/// The format is a short text header followed by the raw little-endian f32
/// payloads concatenated in header order:
///
/// ```text
/// HANDVOX 1
/// ARRAYS 2
/// ARRAY points 6000 3
/// ARRAY tsdf 3 32 32 32
/// DATA binary
/// <payload>
/// ```
///
/// Bytes are written with `to_le_bytes`, so a read back reproduces every
/// f32 bit pattern exactly.
pub fn write_arrays(path: impl AsRef<Path>, arrays: &[NamedArray]) -> Result<(), StoreError> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{} {}", MAGIC, VERSION)?;
    writeln!(writer, "ARRAYS {}", arrays.len())?;
    for array in arrays {
        let expected = array.shape.iter().product::<usize>();
        if array.data.len() != expected {
            return Err(StoreError::ShapeMismatch(
                array.name.clone(),
                expected,
                array.data.len(),
            ));
        }
        write!(writer, "ARRAY {}", array.name)?;
        for dim in &array.shape {
            write!(writer, " {}", dim)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "DATA binary")?;

    for array in arrays {
        for value in &array.data {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read back every named array of a store file written by [`write_arrays`].
pub fn read_arrays(path: impl AsRef<Path>) -> Result<Vec<NamedArray>, StoreError> {
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut line = String::new();
    reader.read_line(&mut line)?;
    let mut it = line.split_whitespace();
    if it.next() != Some(MAGIC) {
        return Err(StoreError::MalformedHeader);
    }
    let version = it
        .next()
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or(StoreError::MalformedHeader)?;
    if version != VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }

    line.clear();
    reader.read_line(&mut line)?;
    let num_arrays = line
        .strip_prefix("ARRAYS ")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or(StoreError::MalformedHeader)?;
    if num_arrays > MAX_ARRAYS {
        return Err(StoreError::MalformedHeader);
    }

    let mut headers = Vec::with_capacity(num_arrays);
    for _ in 0..num_arrays {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(StoreError::MalformedHeader);
        }
        let mut it = line.split_whitespace();
        if it.next() != Some("ARRAY") {
            return Err(StoreError::MalformedHeader);
        }
        let name = it.next().ok_or(StoreError::MalformedHeader)?.to_string();
        let shape = it
            .map(|dim| dim.parse::<usize>().map_err(|_| StoreError::MalformedHeader))
            .collect::<Result<Vec<_>, _>>()?;
        let elements = shape.iter().product::<usize>();
        if shape.is_empty() || elements > MAX_ELEMENTS {
            return Err(StoreError::MalformedHeader);
        }
        headers.push((name, shape, elements));
    }

    line.clear();
    reader.read_line(&mut line)?;
    if line.trim() != "DATA binary" {
        return Err(StoreError::MalformedHeader);
    }

    let mut arrays = Vec::with_capacity(num_arrays);
    for (name, shape, elements) in headers {
        let mut payload = vec![0u8; elements * 4];
        reader.read_exact(&mut payload)?;
        let data = payload
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect::<Vec<_>>();
        arrays.push(NamedArray { name, shape, data });
    }
    Ok(arrays)
}
