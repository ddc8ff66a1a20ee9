// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// Everything that touches Burn tensors lives here:
//
//   model.rs    — ESPCN convolution stack + pixel shuffle
//   trainer.rs  — epoch loop, validation trigger, evaluation,
//                 log/plot/checkpoint hand-off
//   quality.rs  — MSE / PSNR / SSIM on host buffers
//
// plus the backend aliases and the accelerator check used at
// start-up.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

pub mod model;

pub mod trainer;

pub mod quality;

use burn::backend::Autodiff;
use std::sync::OnceLock;

/// Host CPU backend (always compiled in).
pub type CpuBackend = burn::backend::NdArray<f32>;
pub type CpuTrainBackend = Autodiff<CpuBackend>;

/// GPU backend, present only with the `wgpu` feature.
#[cfg(feature = "wgpu")]
pub type AcceleratorBackend = burn::backend::Wgpu;
#[cfg(feature = "wgpu")]
pub type AcceleratorTrainBackend = Autodiff<AcceleratorBackend>;

/// Whether the accelerator backend is compiled in and can reach an adapter.
///
/// Checked once per process by running a one-element tensor on the
/// default wgpu device.
pub fn accelerator_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(check_accelerator)
}

#[cfg(feature = "wgpu")]
fn check_accelerator() -> bool {
    use burn::tensor::Tensor;
    use std::panic;

    // cubecl panics when no adapter exists; keep that off stderr
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let outcome = panic::catch_unwind(|| {
        let device = burn::backend::wgpu::WgpuDevice::default();
        Tensor::<AcceleratorBackend, 1>::from_floats([0.0f32], &device).into_data()
    });
    panic::set_hook(hook);

    match outcome {
        Ok(_) => true,
        Err(_) => {
            tracing::warn!("wgpu backend found no usable adapter");
            false
        }
    }
}

#[cfg(not(feature = "wgpu"))]
fn check_accelerator() -> bool {
    false
}
