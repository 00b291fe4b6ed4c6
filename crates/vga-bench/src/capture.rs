//! Artifact emission: binary pixel-map (PPM) and PNG previews.

use std::error::Error;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::frame::{CaptureWindow, FrameBuffer};

/// Write the frame as a binary pixel map.
///
/// Fixed header `P6 <width> <height> 255\n` followed by raw R,G,B bytes
/// per pixel, row-major.
pub fn write_ppm(frame: &FrameBuffer, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let window = frame.window();
    writeln!(out, "P6 {} {} 255", window.width(), window.height())?;
    for pixel in frame.pixels() {
        out.write_all(pixel)?;
    }
    Ok(())
}

/// Save the frame as a PPM file.
pub fn save_ppm(frame: &FrameBuffer, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::create(path)?;
    let mut w = BufWriter::new(file);
    write_ppm(frame, &mut w)?;
    w.flush()?;
    Ok(())
}

/// Read a frame back from a binary pixel map written by [`write_ppm`].
pub fn read_ppm(input: &mut impl Read) -> Result<FrameBuffer, Box<dyn Error>> {
    let mut reader = BufReader::new(input);
    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header)?;
    let header = String::from_utf8(header)?;

    let mut fields = header.split_whitespace();
    let magic = fields.next().ok_or("missing PPM magic")?;
    if magic != "P6" {
        return Err(format!("not a P6 pixel map: {magic}").into());
    }
    let width: u16 = fields.next().ok_or("missing width")?.parse()?;
    let height: u16 = fields.next().ok_or("missing height")?.parse()?;
    let maxval = fields.next().ok_or("missing maxval")?;
    if maxval != "255" {
        return Err(format!("unsupported maxval: {maxval}").into());
    }

    let window = CaptureWindow::new(width, height)?;
    let mut raw = vec![0u8; window.pixel_count() * 3];
    reader.read_exact(&mut raw)?;

    let mut frame = FrameBuffer::new(window);
    for rgb in raw.chunks_exact(3) {
        frame.push([rgb[0], rgb[1], rgb[2]]);
    }
    Ok(frame)
}

/// Load a PPM file written by [`save_ppm`].
pub fn load_ppm(path: &Path) -> Result<FrameBuffer, Box<dyn Error>> {
    let mut file = fs::File::open(path)?;
    read_ppm(&mut file)
}

/// Save the frame as a PNG file for easier viewing.
pub fn save_screenshot(frame: &FrameBuffer, path: &Path) -> Result<(), Box<dyn Error>> {
    let window = frame.window();

    let file = fs::File::create(path)?;
    let w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, u32::from(window.width()), u32::from(window.height()));
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut rgb = Vec::with_capacity(frame.len() * 3);
    for pixel in frame.pixels() {
        rgb.extend_from_slice(pixel);
    }

    writer.write_image_data(&rgb)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_frame() -> FrameBuffer {
        let window = CaptureWindow::new(2, 2).expect("valid window");
        let mut frame = FrameBuffer::new(window);
        frame.push([0, 85, 170]);
        frame.push([255, 0, 0]);
        frame.push([0, 255, 0]);
        frame.push([0, 0, 255]);
        frame
    }

    #[test]
    fn ppm_header_is_fixed_format() {
        let mut bytes = Vec::new();
        write_ppm(&small_frame(), &mut bytes).expect("write to memory");

        assert!(bytes.starts_with(b"P6 2 2 255\n"));
        assert_eq!(bytes.len(), b"P6 2 2 255\n".len() + 4 * 3);
        // First pixel immediately after the header, channel order R,G,B.
        assert_eq!(&bytes[11..14], &[0, 85, 170]);
    }

    #[test]
    fn ppm_round_trips_byte_identically() {
        let frame = small_frame();
        let mut bytes = Vec::new();
        write_ppm(&frame, &mut bytes).expect("write to memory");

        let restored = read_ppm(&mut bytes.as_slice()).expect("read back");
        assert_eq!(restored, frame);

        // And re-serialising produces the identical byte stream.
        let mut again = Vec::new();
        write_ppm(&restored, &mut again).expect("write again");
        assert_eq!(again, bytes);
    }

    #[test]
    fn read_rejects_foreign_headers() {
        assert!(read_ppm(&mut &b"P5 2 2 255\n"[..]).is_err());
        assert!(read_ppm(&mut &b"P6 2 2 65535\n"[..]).is_err());
    }
}
