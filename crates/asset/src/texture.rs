//! Texture loading and data structures.
//! Decodes PNG/JPEG diffuse maps to RGBA8 for the upload collaborator.

use std::path::Path;

use anyhow::Context;

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Wrap an RGBA8 buffer. Fails if the size does not match `width * height * 4`.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            data.len() == expected,
            "RGBA8 data is {} bytes, expected {} for {}x{}",
            data.len(),
            expected,
            width,
            height
        );
        Ok(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        })
    }

    /// Load a texture from an image file.
    ///
    /// With `flip_vertically` the first row of `data` is the bottom row of the
    /// image (GL texture origin).
    pub fn load<P: AsRef<Path>>(path: P, flip_vertically: bool) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;
        let img = if flip_vertically { img.flipv() } else { img };

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Self::new_rgba8(width, height, data)
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size =
            self.width as usize * self.height as usize * self.bytes_per_pixel() as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crate_png() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/crate.png")
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(TextureData::new_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(TextureData::new_rgba8(2, 2, vec![0; 16]).unwrap().is_valid());
    }

    #[test]
    fn loads_png_as_rgba8() {
        let tex = TextureData::load(crate_png(), false).expect("load png");
        assert_eq!((tex.width, tex.height), (4, 2));
        assert!(tex.is_valid());
        // Top row is red.
        assert_eq!(&tex.data[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn flip_puts_bottom_row_first() {
        let tex = TextureData::load(crate_png(), true).expect("load png");
        assert_eq!(&tex.data[..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(TextureData::load("no/such/texture.png", true).is_err());
    }
}
