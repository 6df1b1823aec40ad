use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::{debug, error, info, trace, warn};

use crate::controllers::interactive::errors::dispatcher::DispatcherError;
use crate::core::actions::cancellation::{CancelFlag, CancelToken};
use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::render_tile::render_tile::{RenderTileError, render_tile};
use crate::core::data::pixel_buffer::{PixelBuffer, TileWindow};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::util::partition_tiles::partition_tiles;

/// How long `await_generation` blocks before re-checking the quit token.
pub const AWAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Partitioned,
    Dispatched,
    Awaited,
}

/// What one tile worker sends back when it is done with its tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileReport {
    pub index: usize,
    pub tile: PixelRect,
    pub outcome: Result<u64, RenderTileError>,
}

impl TileReport {
    #[must_use]
    pub fn resolved(&self) -> u64 {
        *self.outcome.as_ref().unwrap_or(&0)
    }

    #[must_use]
    pub fn cancelled(&self) -> bool {
        matches!(self.outcome, Err(RenderTileError::Cancelled(_)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generation: u64,
    pub tiles: usize,
    pub resolved: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaitOutcome {
    Completed(GenerationSummary),
    Cancelled(GenerationSummary),
    /// Nothing was in flight.
    Idle,
}

struct InFlight {
    generation: u64,
    reports: Receiver<TileReport>,
    cancel: CancelFlag,
    started: Instant,
    expected: usize,
}

/// Splits the buffer into tiles and renders them on a pool of worker threads.
///
/// Lifecycle: `partition` → `dispatch` → `await_generation` → `dispatch` ...
/// Each tile is rendered by exactly one pool task that writes only through a
/// [`TileWindow`] over its own rectangle, so the shared buffer needs no lock.
/// A worker drops its buffer handle before reporting, so once every report is
/// in the caller can take `&mut` access to the buffer again.
pub struct TileDispatcher {
    state: DispatcherState,
    pool: Option<rayon::ThreadPool>,
    pool_threads: usize,
    workers: u32,
    bounds: Option<PixelRect>,
    tiles: Vec<PixelRect>,
    generation: u64,
    in_flight: Option<InFlight>,
    last_generation_duration: Option<Duration>,
}

impl Default for TileDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TileDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DispatcherState::Idle,
            pool: None,
            pool_threads: 0,
            workers: 0,
            bounds: None,
            tiles: Vec::new(),
            generation: 0,
            in_flight: None,
            last_generation_duration: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> DispatcherState {
        self.state
    }

    #[must_use]
    pub fn tiles(&self) -> &[PixelRect] {
        &self.tiles
    }

    /// Worker count requested at the last `partition`.
    #[must_use]
    pub fn workers(&self) -> u32 {
        self.workers
    }

    /// Number of the most recently dispatched generation, 0 before the first.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn last_generation_duration(&self) -> Option<Duration> {
        self.last_generation_duration
    }

    /// Recomputes the tile grid for `workers` threads over a `width`×`height`
    /// buffer and resizes the worker pool to match.
    pub fn partition(&mut self, workers: u32, width: u32, height: u32) -> Result<(), DispatcherError> {
        if self.in_flight.is_some() {
            return Err(DispatcherError::GenerationInFlight);
        }

        let bounds = PixelRect::with_size(Point::default(), width, height)?;
        let tiles = partition_tiles(workers, bounds)?;
        let threads = workers.max(1) as usize;

        if self.pool.is_none() || self.pool_threads != threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("tile-worker-{}", i))
                .panic_handler(|_| error!("tile worker panicked"))
                .build()?;

            debug!("built tile worker pool with {} threads", threads);
            self.pool = Some(pool);
            self.pool_threads = threads;
        }

        if tiles.len() != threads {
            warn!(
                "{} workers requested but a {} buffer only fits {} tiles",
                workers,
                bounds,
                tiles.len()
            );
        }

        debug!("partitioned {} into {} tiles", bounds, tiles.len());
        self.workers = workers;
        self.bounds = Some(bounds);
        self.tiles = tiles;
        self.state = DispatcherState::Partitioned;

        Ok(())
    }

    /// Starts one generation: one pool task per tile filling that tile's
    /// unresolved cells. Returns the new generation number without waiting.
    pub fn dispatch<Alg>(
        &mut self,
        buffer: &Arc<PixelBuffer>,
        algorithm: Arc<Alg>,
    ) -> Result<u64, DispatcherError>
    where
        Alg: FractalAlgorithm + 'static,
    {
        match self.state {
            DispatcherState::Idle => return Err(DispatcherError::NotPartitioned),
            DispatcherState::Dispatched => return Err(DispatcherError::GenerationInFlight),
            DispatcherState::Partitioned | DispatcherState::Awaited => {}
        }

        let (Some(pool), Some(bounds)) = (self.pool.as_ref(), self.bounds) else {
            return Err(DispatcherError::NotPartitioned);
        };

        if buffer.pixel_rect() != bounds {
            return Err(DispatcherError::PartitionMismatch {
                partitioned: bounds,
                buffer: buffer.pixel_rect(),
            });
        }

        self.generation += 1;
        let generation = self.generation;
        let (sender, reports) = mpsc::channel();
        let cancel = CancelFlag::new();

        for (index, &tile) in self.tiles.iter().enumerate() {
            let buffer = Arc::clone(buffer);
            let algorithm = Arc::clone(&algorithm);
            let cancel = cancel.clone();
            let sender = sender.clone();

            pool.spawn(move || {
                let outcome = TileWindow::new(&buffer, tile)
                    .map_err(RenderTileError::from)
                    .and_then(|window| render_tile(&window, algorithm.as_ref(), &cancel));

                // Release the buffer before reporting so the awaiting side
                // regains exclusive access as soon as the last report lands.
                drop(buffer);
                drop(algorithm);

                let _ = sender.send(TileReport {
                    index,
                    tile,
                    outcome,
                });
            });
        }

        trace!("generation {} dispatched over {} tiles", generation, self.tiles.len());

        self.in_flight = Some(InFlight {
            generation,
            reports,
            cancel,
            started: Instant::now(),
            expected: self.tiles.len(),
        });
        self.state = DispatcherState::Dispatched;

        Ok(generation)
    }

    /// Blocks until every tile of the current generation has reported.
    ///
    /// `quit` is polled every [`AWAIT_POLL_INTERVAL`]. Once it fires the
    /// workers are told to stop and the remaining reports are drained, so the
    /// buffer is never handed back while a worker still writes to it.
    pub fn await_generation<C>(&mut self, quit: &C) -> Result<AwaitOutcome, DispatcherError>
    where
        C: CancelToken + ?Sized,
    {
        let Some(in_flight) = self.in_flight.take() else {
            return Ok(AwaitOutcome::Idle);
        };

        let mut reported = 0;
        let mut resolved = 0;
        let mut cancelled = false;
        let mut failure = None;

        while reported < in_flight.expected {
            if quit.is_cancelled() && !in_flight.cancel.is_cancelled() {
                info!("cancelling generation {}", in_flight.generation);
                in_flight.cancel.cancel();
            }

            match in_flight.reports.recv_timeout(AWAIT_POLL_INTERVAL) {
                Ok(report) => {
                    reported += 1;
                    resolved += report.resolved();
                    cancelled |= report.cancelled();

                    if let Err(source @ RenderTileError::PixelBuffer(_)) = report.outcome {
                        error!("tile {} failed: {}", report.index, source);
                        if failure.is_none() {
                            failure = Some(DispatcherError::Tile {
                                index: report.index,
                                tile: report.tile,
                                source,
                            });
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    self.state = DispatcherState::Awaited;
                    return Err(DispatcherError::WorkerLost {
                        reported,
                        expected: in_flight.expected,
                    });
                }
            }
        }

        let duration = in_flight.started.elapsed();
        self.state = DispatcherState::Awaited;

        if let Some(failure) = failure {
            return Err(failure);
        }

        let summary = GenerationSummary {
            generation: in_flight.generation,
            tiles: in_flight.expected,
            resolved,
            duration,
        };

        if cancelled {
            debug!(
                "generation {} cancelled after resolving {} pixels",
                summary.generation, resolved
            );
            return Ok(AwaitOutcome::Cancelled(summary));
        }

        debug!(
            "generation {} resolved {} pixels in {:?}",
            summary.generation, resolved, duration
        );
        self.last_generation_duration = Some(duration);

        Ok(AwaitOutcome::Completed(summary))
    }

    /// Cancels anything in flight, waits for it, and drops the tile grid.
    pub fn release(&mut self) -> Result<AwaitOutcome, DispatcherError> {
        let outcome = self.await_generation(&|| true);

        self.tiles.clear();
        self.bounds = None;
        self.state = DispatcherState::Idle;

        outcome
    }
}

impl Drop for TileDispatcher {
    fn drop(&mut self) {
        if let Some(in_flight) = &self.in_flight {
            in_flight.cancel.cancel();
        }
    }
}
