use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use image::DynamicImage;
use tch::nn::ModuleT;
use tch::{CModule, Device, Kind};

use crate::inference::preprocess;
use crate::inference::{Classifier, InferenceError};

/// TorchScript-backed classifier. The module and its label vocabulary are
/// loaded once at startup and shared across workers.
#[derive(Clone)]
pub struct TorchClassifier {
    module: Arc<Mutex<CModule>>,
    labels: Arc<Vec<String>>,
    device: Device,
}

impl TorchClassifier {
    pub fn load(model_path: &Path, labels_path: &Path) -> Result<Self, InferenceError> {
        let device = Device::cuda_if_available();
        let module = CModule::load_on_device(model_path, device)?;
        let labels: Vec<String> = fs::read_to_string(labels_path)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        log::info!(
            "Loaded model {} with {} labels on {:?}",
            model_path.display(),
            labels.len(),
            device
        );
        Ok(Self {
            module: Arc::new(Mutex::new(module)),
            labels: Arc::new(labels),
            device,
        })
    }
}

impl Classifier for TorchClassifier {
    fn logits(&self, image: &DynamicImage) -> Result<Vec<f32>, InferenceError> {
        let tensor = preprocess::to_tensor(image).to_device(self.device);
        let output = self.module.lock().unwrap().forward_t(&tensor, false);
        let flat = output.to_kind(Kind::Float).view([-1]);
        let n = flat.size()[0] as usize;
        let mut logits = vec![0.0f32; n];
        flat.copy_data(&mut logits, n);
        Ok(logits)
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
