//! Thumbnail descriptors.

use courier_codec::{DecodeError, RecordReader, RecordWriter};

/// Pixel format of a stored thumbnail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThumbnailFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl ThumbnailFormat {
    /// The single wire byte identifying this format.
    #[must_use]
    pub const fn wire_tag(&self) -> u8 {
        match self {
            Self::Jpeg => 0,
            Self::Png => 1,
            Self::Webp => 2,
        }
    }

    /// Maps a wire byte back to a format; unknown tags are a type mismatch.
    pub fn from_wire_tag(tag: u8) -> Result<Self, DecodeError> {
        match tag {
            0 => Ok(Self::Jpeg),
            1 => Ok(Self::Png),
            2 => Ok(Self::Webp),
            other => Err(DecodeError::malformed(format!(
                "thumbnail format: unknown tag {other}"
            ))),
        }
    }
}

/// Descriptor of a thumbnail stored outside the record.
///
/// Carries shape and size only — the pixel data itself lives with the
/// file layer and is fetched on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub format: ThumbnailFormat,
    pub width: i32,
    pub height: i32,
    pub byte_size: u32,
}

impl Thumbnail {
    /// Writes the descriptor in declared field order.
    pub fn write(&self, writer: &mut RecordWriter) {
        writer.write_u8(self.format.wire_tag());
        writer.write_i32(self.width);
        writer.write_i32(self.height);
        writer.write_u32(self.byte_size);
    }

    /// Reads a descriptor, rejecting unknown format tags.
    pub fn read(reader: &mut RecordReader<'_>) -> Result<Self, DecodeError> {
        let format = ThumbnailFormat::from_wire_tag(reader.read_u8("thumbnail format")?)?;
        let width = reader.read_i32("thumbnail width")?;
        let height = reader.read_i32("thumbnail height")?;
        let byte_size = reader.read_u32("thumbnail byte size")?;
        Ok(Self {
            format,
            width,
            height,
            byte_size,
        })
    }
}
