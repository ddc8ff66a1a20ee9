// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Used when the data directory is one flat folder of images.
// The list is shuffled with a seeded RNG, so the same seed always
// assigns the same files to the same split.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Fractions of a flat directory assigned to train and validation.
/// The remainder goes to test.
pub const TRAIN_FRACTION: f64 = 0.6;
pub const VAL_FRACTION:   f64 = 0.2;

/// Shuffle `items` with `seed` and split into (train, val, test).
///
/// With at least three items, val and test each receive at least one.
pub fn split_three_way<T>(
    mut items:      Vec<T>,
    train_fraction: f64,
    val_fraction:   f64,
    seed:           u64,
) -> (Vec<T>, Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);

    let total      = items.len();
    let mut n_train = ((total as f64) * train_fraction).round() as usize;
    let mut n_val   = ((total as f64) * val_fraction).round() as usize;
    n_train = n_train.min(total);
    n_val   = n_val.min(total - n_train);

    if total >= 3 {
        n_val = n_val.max(1);
        while n_train + n_val >= total {
            if n_train > 0 { n_train -= 1 } else { n_val -= 1 }
        }
    }

    let mut rest = items.split_off(n_train);
    let test     = rest.split_off(n_val);

    tracing::debug!(
        "Dataset split: {} train, {} val, {} test",
        items.len(),
        rest.len(),
        test.len(),
    );

    (items, rest, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val, test) = split_three_way(items, 0.6, 0.2, 7);
        assert_eq!(train.len(), 60);
        assert_eq!(val.len(),   20);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, val, test) = split_three_way(items, 0.7, 0.1, 1);
        let mut all: Vec<usize> = train.into_iter().chain(val).chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = split_three_way((0..30).collect::<Vec<_>>(), 0.6, 0.2, 123);
        let b = split_three_way((0..30).collect::<Vec<_>>(), 0.6, 0.2, 123);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tiny_dataset_fills_every_split() {
        let (train, val, test) = split_three_way(vec![1, 2, 3], 0.6, 0.2, 0);
        assert_eq!((train.len(), val.len(), test.len()), (1, 1, 1));
    }

    #[test]
    fn test_empty_dataset() {
        let (train, val, test) = split_three_way(Vec::<usize>::new(), 0.6, 0.2, 0);
        assert!(train.is_empty() && val.is_empty() && test.is_empty());
    }
}
