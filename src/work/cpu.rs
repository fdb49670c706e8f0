//! CPU-based work generation.
//!
//! The search is embarrassingly parallel: each worker walks nonces from its
//! own random starting point and the first hit wins. Workers poll two flags
//! (found, cancelled) once per batch, so cancellation latency is bounded by
//! the batch size without paying for an atomic load on every hash.
//!
//! The hot loop hashes with `blake2b_simd`, which probes the CPU once per
//! `Params` (AVX2, SSE4.1, or the portable implementation) rather than per
//! hash; the portable fallback keeps non-x86 targets working.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};
use crate::types::{BlockHash, Work};
use crate::work::{validate_difficulty, WorkThreshold};

/// Hashes evaluated between flag checks.
const BATCH_ITERATIONS: u64 = 250_000;

/// Process-wide thread pool for work generation, built on first use.
///
/// When unset, searches run on rayon's default global pool. Tearing the pool
/// down at process exit is left to the OS.
static WORK_POOL: Mutex<Option<Arc<ThreadPool>>> = Mutex::new(None);

/// Replace the process-wide work thread pool with one of `num_threads`
/// threads (0 picks the number of available cores).
///
/// Searches already running keep their current pool.
pub fn configure_work_pool(num_threads: usize) {
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| std::format!("xno-work-{}", i))
        .build()
        .expect("failed to spawn work threads");
    let mut guard = WORK_POOL.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Arc::new(pool));
}

fn configured_pool() -> Option<Arc<ThreadPool>> {
    WORK_POOL
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Read a random starting nonce from the system RNG.
///
/// On RNG failure the worker starts from zero, which only costs search-space
/// overlap between workers.
fn random_start() -> u64 {
    let mut bytes = [0u8; 8];
    let _ = getrandom::getrandom(&mut bytes);
    u64::from_le_bytes(bytes)
}

/// Walk nonces from `start_nonce` until one meets `threshold` or a flag
/// stops the search.
///
/// The nonce is incremented (wrapping) before each evaluation, so
/// `start_nonce` itself is never tested. Returns `None` when another worker
/// won or the caller cancelled.
fn search(
    root: &BlockHash,
    start_nonce: u64,
    threshold: u64,
    found: &AtomicBool,
    cancelled: Option<&AtomicBool>,
) -> Option<u64> {
    let mut params = blake2b_simd::Params::new();
    params.hash_length(8);

    let mut input = [0u8; 40];
    input[8..].copy_from_slice(root.as_bytes());

    let mut nonce = start_nonce;
    loop {
        for _ in 0..BATCH_ITERATIONS {
            nonce = nonce.wrapping_add(1);
            input[..8].copy_from_slice(&nonce.to_le_bytes());

            let digest = params.hash(&input);
            let mut value = [0u8; 8];
            value.copy_from_slice(digest.as_bytes());
            if u64::from_le_bytes(value) >= threshold {
                found.store(true, Ordering::Relaxed);
                return Some(nonce);
            }
        }

        if found.load(Ordering::Relaxed) {
            return None;
        }
        if let Some(cancel) = cancelled {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
        }
    }
}

/// Search for a work nonce on the calling thread.
///
/// Runs the canonical inner loop starting just past `start_nonce`. Returns
/// [`Error::Cancelled`] if the flag is raised before a nonce is found, and
/// [`Error::InvalidDifficulty`] for a zero threshold.
pub fn do_work(
    root: &BlockHash,
    start_nonce: u64,
    threshold: u64,
    cancelled: Option<&AtomicBool>,
) -> Result<Work> {
    validate_difficulty(threshold)?;

    let found = AtomicBool::new(false);
    search(root, start_nonce, threshold, &found, cancelled)
        .map(Work::new)
        .ok_or(Error::Cancelled)
}

/// Parallel CPU work generator.
///
/// Fans the search out over the work thread pool; see
/// [`configure_work_pool`] for sizing it.
#[derive(Debug, Clone)]
pub struct CpuWorkGenerator {
    /// Work threshold configuration.
    threshold: WorkThreshold,
    /// Number of search workers (0 = one per pool thread).
    workers: usize,
}

impl CpuWorkGenerator {
    /// Create a new CPU work generator with mainnet thresholds.
    pub fn new() -> Self {
        CpuWorkGenerator {
            threshold: WorkThreshold::MAINNET,
            workers: 0,
        }
    }

    /// Set custom work thresholds.
    pub fn with_threshold(mut self, threshold: WorkThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of search workers.
    ///
    /// Use 0 to match the pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// The generator's threshold configuration.
    pub fn threshold(&self) -> WorkThreshold {
        self.threshold
    }

    /// Generate work for a root at the given threshold.
    ///
    /// Blocks until a nonce is found or `cancelled` is raised; cancellation
    /// is observed at the next batch boundary on every worker.
    pub fn generate(
        &self,
        root: &BlockHash,
        threshold: u64,
        cancelled: Option<&AtomicBool>,
    ) -> Result<Work> {
        validate_difficulty(threshold)?;

        let run = || {
            let workers = if self.workers == 0 {
                rayon::current_num_threads()
            } else {
                self.workers
            };
            let found = AtomicBool::new(false);

            (0..workers)
                .into_par_iter()
                .find_map_any(|_| search(root, random_start(), threshold, &found, cancelled))
        };

        let nonce = match configured_pool() {
            Some(pool) => pool.install(run),
            None => run(),
        };

        // Every worker returning empty-handed means the search was
        // cancelled; a successful worker always wins find_map_any.
        nonce.map(Work::new).ok_or(Error::Cancelled)
    }

    /// Generate work at the threshold for a send/change block.
    pub fn generate_send(&self, root: &BlockHash) -> Result<Work> {
        self.generate(root, self.threshold.send, None)
    }

    /// Generate work at the threshold for a state receive block.
    pub fn generate_receive(&self, root: &BlockHash) -> Result<Work> {
        self.generate(root, self.threshold.receive, None)
    }
}

impl Default for CpuWorkGenerator {
    fn default() -> Self {
        Self::new()
    }
}
