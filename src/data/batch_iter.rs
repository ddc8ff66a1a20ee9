// ============================================================
// Layer 4 — Batch Iterator
// ============================================================
// Walks a split batch by batch and hands back tensors.
//
//   order      dataset order (evaluation) or a permutation drawn
//              from the caller's seeded RNG (training)
//   decoding   the tiles of one batch are decoded and cut on a
//              rayon pool of `threads` workers
//   stacking   SrBatcher turns the samples into NCHW tensors
//
// Parallel results are collected back in index order, so what a
// batch contains depends only on the order, never on which worker
// finished first.

use anyhow::Result;
use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    prelude::*,
};
use rand::{seq::SliceRandom, Rng};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};

use crate::data::{
    batcher::{SrBatch, SrBatcher},
    dataset::{SrDataset, SrSample},
};

pub struct SrLoader<B: Backend> {
    dataset:    SrDataset,
    batcher:    SrBatcher<B>,
    batch_size: usize,
    pool:       ThreadPool,
}

impl<B: Backend> SrLoader<B> {
    pub fn new(dataset: SrDataset, batch_size: usize, threads: usize, device: B::Device) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("geosr-decode-{i}"))
            .build()?;
        Ok(Self {
            dataset,
            batcher:    SrBatcher::new(device),
            batch_size: batch_size.max(1),
            pool,
        })
    }

    /// Number of batches per pass; the last one may be short.
    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// One pass in dataset order.
    pub fn sequential(&self) -> impl Iterator<Item = Result<SrBatch<B>>> + '_ {
        self.batches((0..self.dataset.len()).collect())
    }

    /// One pass in an order drawn from `rng`.
    pub fn shuffled<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Result<SrBatch<B>>> + '_ {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        order.shuffle(rng);
        self.batches(order)
    }

    fn batches(&self, order: Vec<usize>) -> impl Iterator<Item = Result<SrBatch<B>>> + '_ {
        let batch_size = self.batch_size;
        (0..order.len()).step_by(batch_size).map(move |start| {
            let end = (start + batch_size).min(order.len());
            self.load_batch(&order[start..end])
        })
    }

    fn load_batch(&self, indices: &[usize]) -> Result<SrBatch<B>> {
        let dataset = &self.dataset;
        let samples: Vec<SrSample> = self.pool.install(|| {
            indices
                .par_iter()
                .map(|&i| dataset.load(i))
                .collect::<Result<Vec<_>>>()
        })?;
        Ok(self.batcher.batch(samples))
    }
}
