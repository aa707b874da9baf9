use image::DynamicImage;
use image::imageops::FilterType;
use tch::Tensor;

pub const IMAGE_SIZE: u32 = 224;

// The pretrained checkpoint's processor scales pixels to [-1, 1].
const MEAN: f32 = 0.5;
const STD: f32 = 0.5;

/// Canonical model input: RGB, 224x224, normalized, NCHW.
pub fn to_tensor(image: &DynamicImage) -> Tensor {
    let rgb = image
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle)
        .to_rgb8();

    let plane = (IMAGE_SIZE * IMAGE_SIZE) as usize;
    let mut data = vec![0.0f32; 3 * plane];
    for (i, pixel) in rgb.pixels().enumerate() {
        for c in 0..3 {
            data[c * plane + i] = (f32::from(pixel[c]) / 255.0 - MEAN) / STD;
        }
    }

    Tensor::from_slice(&data).view([1, 3, i64::from(IMAGE_SIZE), i64::from(IMAGE_SIZE)])
}
