// ============================================================
// Layer 5 — ESPCN Model
// ============================================================
// Efficient Sub-Pixel Convolutional Network:
//
//   [N, C, H, W]
//     conv 5x5  C      → k      + ReLU
//     conv 3x3  k      → k      + ReLU
//     conv 3x3  k      → k/2    + ReLU
//     conv 3x3  k/2    → C·f²
//     pixel shuffle (f)
//   [N, C, H·f, W·f]
//
// All convolutions run at the low resolution; only the final
// rearrangement produces the high-resolution grid.
//
// Reference: Shi et al. (2016) Real-Time Single Image and Video
//            Super-Resolution Using an Efficient Sub-Pixel CNN

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        loss::{MseLoss, Reduction},
        PaddingConfig2d,
    },
    prelude::*,
    tensor::activation::relu,
};

#[derive(Config, Debug)]
pub struct EspcnConfig {
    pub nb_channel:     usize,
    pub upscale_factor: usize,
    #[config(default = 64)]
    pub base_kernel:    usize,
}

impl EspcnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Espcn<B> {
        let k = self.base_kernel;
        let f = self.upscale_factor;
        Espcn {
            conv1: conv(self.nb_channel, k, 5, device),
            conv2: conv(k, k, 3, device),
            conv3: conv(k, k / 2, 3, device),
            conv4: conv(k / 2, self.nb_channel * f * f, 3, device),
            upscale_factor: f,
        }
    }
}

/// Same-size convolution with odd kernel `size`.
fn conv<B: Backend>(channels_in: usize, channels_out: usize, size: usize, device: &B::Device) -> Conv2d<B> {
    Conv2dConfig::new([channels_in, channels_out], [size, size])
        .with_padding(PaddingConfig2d::Explicit(size / 2, size / 2))
        .init(device)
}

#[derive(Module, Debug)]
pub struct Espcn<B: Backend> {
    pub conv1:          Conv2d<B>,
    pub conv2:          Conv2d<B>,
    pub conv3:          Conv2d<B>,
    pub conv4:          Conv2d<B>,
    pub upscale_factor: usize,
}

impl<B: Backend> Espcn<B> {
    /// inputs: [N, C, H, W] → [N, C, H·f, W·f]
    pub fn forward(&self, inputs: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = relu(self.conv1.forward(inputs));
        let x = relu(self.conv2.forward(x));
        let x = relu(self.conv3.forward(x));
        pixel_shuffle(self.conv4.forward(x), self.upscale_factor)
    }

    /// Mean squared reconstruction error against `targets`.
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 4>,
        targets: Tensor<B, 4>,
    ) -> (Tensor<B, 1>, Tensor<B, 4>) {
        let output = self.forward(inputs);
        let loss   = MseLoss::new().forward(output.clone(), targets, Reduction::Mean);
        (loss, output)
    }
}

/// Rearrange [N, C·r², H, W] into [N, C, H·r, W·r].
///
/// Channel `c·r² + i·r + j` lands at row offset `i` and column
/// offset `j` inside each r×r output cell.
pub fn pixel_shuffle<B: Backend>(x: Tensor<B, 4>, r: usize) -> Tensor<B, 4> {
    let [n, c, h, w] = x.dims();
    let out_c = c / (r * r);
    x.reshape([n, out_c, r, r, h, w])
        .permute([0, 1, 4, 2, 5, 3])
        .reshape([n, out_c, h * r, w * r])
}
