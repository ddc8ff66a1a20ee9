// ============================================================
// Layer 4 — Super-Resolution Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<SrSample> into
// two 4-D tensors:
//
//   inputs:  [N, C, H,   W  ]
//   targets: [N, C, H·f, W·f]
//
// Every sample in a split shares the same tile size, so the
// channel-major buffers concatenate directly into NCHW order.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::SrSample;

// ─── SrBatch ──────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct SrBatch<B: Backend> {
    /// Low-resolution tiles — shape: [batch, channels, h, w]
    pub inputs: Tensor<B, 4>,

    /// High-resolution tiles — shape: [batch, channels, h·f, w·f]
    pub targets: Tensor<B, 4>,
}

// ─── SrBatcher ────────────────────────────────────────────────────────────────
/// Holds the target device so tensors land on the run's device.
#[derive(Clone, Debug)]
pub struct SrBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SrBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<SrSample, SrBatch<B>> for SrBatcher<B> {
    fn batch(&self, items: Vec<SrSample>) -> SrBatch<B> {
        let batch_size = items.len();
        let [c, ih, iw] = items[0].input_dims();
        let [_, th, tw] = items[0].target_dims();

        let input_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.input.iter().copied())
            .collect();
        let target_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.target.iter().copied())
            .collect();

        let inputs = Tensor::<B, 4>::from_data(
            TensorData::new(input_flat, [batch_size, c, ih, iw]),
            &self.device,
        );
        let targets = Tensor::<B, 4>::from_data(
            TensorData::new(target_flat, [batch_size, c, th, tw]),
            &self.device,
        );

        SrBatch { inputs, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    fn sample(fill: f32) -> SrSample {
        SrSample {
            channels:    3,
            input_size:  2,
            target_size: 4,
            input:       vec![fill; 3 * 2 * 2],
            target:      vec![fill; 3 * 4 * 4],
        }
    }

    #[test]
    fn test_batch_shapes() {
        let batcher = SrBatcher::<NdArray>::new(Default::default());
        let batch   = batcher.batch(vec![sample(0.0), sample(1.0), sample(0.5)]);
        assert_eq!(batch.inputs.dims(),  [3, 3, 2, 2]);
        assert_eq!(batch.targets.dims(), [3, 3, 4, 4]);
    }

    #[test]
    fn test_samples_keep_their_order() {
        let batcher = SrBatcher::<NdArray>::new(Default::default());
        let batch   = batcher.batch(vec![sample(0.25), sample(0.75)]);
        let second: Vec<f32> = batch
            .inputs
            .slice([1..2, 0..3, 0..2, 0..2])
            .into_data()
            .to_vec::<f32>()
            .unwrap();
        assert!(second.iter().all(|&v| v == 0.75));
    }
}
