use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::data::colour::Colour;
use crate::core::data::frame_snapshot::FrameSnapshot;

/// Colour written for cells that were never resolved.
pub const PPM_BACKGROUND: Colour = Colour::BLACK;

/// Encodes `snapshot` as a binary (P6) PPM image.
pub fn encode_ppm(snapshot: &FrameSnapshot, mut writer: impl Write) -> std::io::Result<()> {
    // PPM header: P6 means binary RGB, then width height max_colour
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", snapshot.width(), snapshot.height())?;
    writeln!(writer, "255")?;
    writer.write_all(&snapshot.to_rgb_bytes(PPM_BACKGROUND))?;
    writer.flush()
}

pub fn write_ppm(snapshot: &FrameSnapshot, filepath: impl AsRef<Path>) -> std::io::Result<()> {
    let file = std::fs::File::create(filepath)?;

    encode_ppm(snapshot, BufWriter::new(file))
}
