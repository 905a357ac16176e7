use image::{GrayImage, Rgb, RgbImage};

use crate::error::{DetectError, Result};

/// The three intensity planes the detector thresholds independently.
pub(crate) struct ChannelPlanes {
    pub green: GrayImage,
    pub u: GrayImage,
    pub v: GrayImage,
}

impl ChannelPlanes {
    /// Planes in the order their contours are concatenated.
    pub fn into_array(self) -> [(&'static str, GrayImage); 3] {
        [("green", self.green), ("u", self.u), ("v", self.v)]
    }
}

/// Converts one RGB pixel to 8-bit `(Y, U, V)` with the analogue BT.601 weights.
///
/// Chrominance is offset by 128 so that neutral greys map to the middle of the range.
pub(crate) fn rgb_to_yuv(pixel: Rgb<u8>) -> [u8; 3] {
    let Rgb([r, g, b]) = pixel;
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = 0.492 * (b - y) + 128.0;
    let v = 0.877 * (r - y) + 128.0;

    [saturate(y), saturate(u), saturate(v)]
}

fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Splits `image` into its green plane and the two chrominance planes of its YUV form.
pub(crate) fn split_channels(image: &RgbImage) -> Result<ChannelPlanes> {
    let (width, height) = image.dimensions();
    let len = width as usize * height as usize;

    let mut green = Vec::with_capacity(len);
    let mut u = Vec::with_capacity(len);
    let mut v = Vec::with_capacity(len);

    for pixel in image.pixels() {
        green.push(pixel[1]);
        let [_, cu, cv] = rgb_to_yuv(*pixel);
        u.push(cu);
        v.push(cv);
    }

    let plane = |data: Vec<u8>| {
        GrayImage::from_raw(width, height, data)
            .ok_or_else(|| DetectError::processing("channel split"))
    };

    Ok(ChannelPlanes {
        green: plane(green)?,
        u: plane(u)?,
        v: plane(v)?,
    })
}
