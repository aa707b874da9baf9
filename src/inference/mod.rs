pub mod model;
pub mod preprocess;

use image::DynamicImage;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Model error: {0}")]
    Model(#[from] tch::TchError),
    #[error("Failed to read label file: {0}")]
    Labels(#[from] std::io::Error),
    #[error("Model produced no logits")]
    EmptyLogits,
    #[error("Predicted class index {0} has no label")]
    UnknownClass(usize),
}

/// Seam between the request pipeline and the pretrained model. The model is
/// consumed as-is: one forward pass yields raw logits over a fixed label
/// vocabulary, index-aligned with `labels()`.
pub trait Classifier: Send + Sync {
    fn logits(&self, image: &DynamicImage) -> Result<Vec<f32>, InferenceError>;
    fn labels(&self) -> &[String];
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
}

/// Arg-max over the classifier's logits picks the label; confidence is the
/// softmax probability at that index, rounded to 4 decimal places.
pub fn predict(
    classifier: &dyn Classifier,
    image: &DynamicImage,
) -> Result<Prediction, InferenceError> {
    let logits = classifier.logits(image)?;
    if logits.is_empty() {
        return Err(InferenceError::EmptyLogits);
    }

    let mut best = 0;
    for (i, &value) in logits.iter().enumerate() {
        if value > logits[best] {
            best = i;
        }
    }

    let label = classifier
        .labels()
        .get(best)
        .cloned()
        .ok_or(InferenceError::UnknownClass(best))?;

    let confidence = round4(softmax_at(&logits, best));
    Ok(Prediction { label, confidence })
}

// Computed in f64 with max-subtraction so large logits cannot overflow.
fn softmax_at(logits: &[f32], index: usize) -> f64 {
    let max = logits
        .iter()
        .fold(f64::NEG_INFINITY, |m, &v| m.max(f64::from(v)));
    let sum: f64 = logits.iter().map(|&v| (f64::from(v) - max).exp()).sum();
    (f64::from(logits[index]) - max).exp() / sum
}

fn round4(p: f64) -> f64 {
    (p * 10_000.0).round() / 10_000.0
}
