use anyhow::Error;
use ndarray::{s, Array3};

/// Read access to an RGB pixel buffer, scoped to rectangular sub-regions.
///
/// Implementations return an array of shape `(h, w, 3)` holding the RGB
/// triples of the requested region, row-major with `[y, x, channel]` indexing
/// relative to the region's top-left corner.
pub trait PixelSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn read_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Array3<u8>, Error>;
}

/// RgbImage is an in-memory RGB888 buffer backed by an ndarray of shape `(height, width, 3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    data: Array3<u8>,
}

impl RgbImage {
    pub fn new(data: Array3<u8>) -> Result<Self, Error> {
        if data.dim().2 != 3 {
            return Err(Error::msg(format!("rgb image - expected 3 channels, got {}", data.dim().2)))
        }
        Ok(RgbImage { data })
    }

    /// from_raw_rgb builds an image from interleaved RGB bytes.
    ///
    /// # Arguments
    /// * `width` - image width in pixels
    /// * `height` - image height in pixels
    /// * `bytes` - `width * height * 3` bytes, row-major
    ///
    /// # Returns
    /// * `Result<RgbImage, Error>`
    pub fn from_raw_rgb(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, Error> {
        let arr = match Array3::from_shape_vec((height as usize, width as usize, 3), bytes) {
            Ok(arr) => arr,
            Err(e) => return Err(Error::from(e)),
        };
        Ok(RgbImage { data: arr })
    }

    /// from_fn builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> [u8; 3],
    {
        let data = Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
            f(x as u32, y as u32)[c]
        });
        RgbImage { data }
    }

    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self::from_fn(width, height, |_, _| rgb)
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    fn read_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Array3<u8>, Error> {
        let x_end = x as u64 + w as u64;
        let y_end = y as u64 + h as u64;
        if x_end > self.width() as u64 || y_end > self.height() as u64 {
            return Err(Error::msg(format!(
                "rgb image - region ({x}, {y}, {w}x{h}) exceeds image bounds {}x{}",
                self.width(),
                self.height()
            )))
        }
        let (x, y, x_end, y_end) = (x as usize, y as usize, x_end as usize, y_end as usize);
        Ok(self.data.slice(s![y..y_end, x..x_end, ..]).to_owned())
    }
}
