// ============================================================
// Layer 5 — Image Quality Metrics
// ============================================================
// Host-side metrics for one reconstructed image against its
// target. Both buffers are channel-major with values in [0, 1];
// predictions are clamped to that range first.
//
//   MSE   mean squared error
//   PSNR  10·log10(1 / MSE), capped at MAX_PSNR for exact matches
//   SSIM  structural similarity from whole-image statistics,
//         averaged over channels

pub const MAX_PSNR: f64 = 100.0;

const C1: f64 = 0.01 * 0.01;
const C2: f64 = 0.03 * 0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageScore {
    pub mse:  f64,
    pub psnr: f64,
    pub ssim: f64,
}

pub fn score(prediction: &[f32], target: &[f32], channels: usize) -> ImageScore {
    let mse = mse(prediction, target);
    ImageScore { mse, psnr: psnr_from_mse(mse), ssim: ssim(prediction, target, channels) }
}

pub fn mse(prediction: &[f32], target: &[f32]) -> f64 {
    if target.is_empty() {
        return 0.0;
    }
    let sum: f64 = prediction
        .iter()
        .zip(target)
        .map(|(&p, &t)| {
            let d = clamp(p) - t as f64;
            d * d
        })
        .sum();
    sum / target.len() as f64
}

pub fn psnr_from_mse(mse: f64) -> f64 {
    if mse <= 0.0 {
        MAX_PSNR
    } else {
        (10.0 * (1.0 / mse).log10()).min(MAX_PSNR)
    }
}

pub fn ssim(prediction: &[f32], target: &[f32], channels: usize) -> f64 {
    let channels = channels.max(1);
    let plane    = target.len() / channels;
    if plane == 0 {
        return 1.0;
    }

    let total: f64 = (0..channels)
        .map(|c| {
            let range = c * plane..(c + 1) * plane;
            ssim_plane(&prediction[range.clone()], &target[range])
        })
        .sum();
    total / channels as f64
}

fn ssim_plane(x: &[f32], y: &[f32]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().map(|&v| clamp(v)).sum::<f64>() / n;
    let mean_y = y.iter().map(|&v| v as f64).sum::<f64>() / n;

    let (mut var_x, mut var_y, mut cov) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let dx = clamp(a) - mean_x;
        let dy = b as f64 - mean_y;
        var_x += dx * dx;
        var_y += dy * dy;
        cov   += dx * dy;
    }
    var_x /= n;
    var_y /= n;
    cov   /= n;

    ((2.0 * mean_x * mean_y + C1) * (2.0 * cov + C2))
        / ((mean_x * mean_x + mean_y * mean_y + C1) * (var_x + var_y + C2))
}

fn clamp(v: f32) -> f64 {
    (v as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_images_score_perfectly() {
        let img: Vec<f32> = (0..16).map(|i| i as f32 / 16.0).collect();
        let s = score(&img, &img, 1);
        assert_eq!(s.mse, 0.0);
        assert_eq!(s.psnr, MAX_PSNR);
        assert!((s.ssim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_psnr_of_known_error() {
        // Uniform error of 0.1 → MSE 0.01 → 20 dB
        let target = vec![0.5f32; 8];
        let pred   = vec![0.6f32; 8];
        let s = score(&pred, &target, 1);
        assert!((s.psnr - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_predictions_are_clamped() {
        let target = vec![1.0f32; 4];
        let pred   = vec![3.0f32; 4];
        assert_eq!(mse(&pred, &target), 0.0);
    }

    #[test]
    fn test_ssim_drops_for_inverted_structure() {
        let target: Vec<f32> = (0..32).map(|i| (i % 2) as f32).collect();
        let inverted: Vec<f32> = target.iter().map(|v| 1.0 - v).collect();
        assert!(ssim(&inverted, &target, 1) < 0.0);
    }
}
