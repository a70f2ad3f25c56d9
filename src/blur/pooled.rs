use std::ops::Range;
use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use super::{blur_rows, check_same_dimensions, BlurExecutor};
use crate::raster::Raster;
use crate::Result;

const BANDS_PER_THREAD: usize = 4;

/// Splits the image into bands of rows and blurs them on a thread pool.
///
/// Every band is computed into its own raster by a single job and merged into
/// the output on the calling thread, so each output row has exactly one writer.
pub struct PooledExecutor {
    threadpool: ThreadPool,
    rows_per_band: Option<usize>,
}

impl PooledExecutor {
    pub fn new(number_of_threads: usize) -> Self {
        Self {
            threadpool: ThreadPool::new(number_of_threads.max(1)),
            rows_per_band: None,
        }
    }

    /// Fixes the band height instead of deriving it from the image and pool size.
    pub fn with_rows_per_band(mut self, rows_per_band: usize) -> Self {
        self.rows_per_band = Some(rows_per_band.max(1));
        self
    }

    pub fn number_of_threads(&self) -> usize {
        self.threadpool.max_count()
    }

    fn rows_per_band(&self, height: usize) -> usize {
        self.rows_per_band.unwrap_or_else(|| {
            let number_of_bands = self.number_of_threads() * BANDS_PER_THREAD;
            height.div_ceil(number_of_bands).max(1)
        })
    }
}

fn band_ranges(height: usize, rows_per_band: usize) -> Vec<Range<usize>> {
    (0..height)
        .step_by(rows_per_band)
        .map(|start| start..(start + rows_per_band).min(height))
        .collect()
}

impl BlurExecutor for PooledExecutor {
    fn blur_into(&self, input: &Raster, output: &mut Raster) -> Result<()> {
        check_same_dimensions(input, output);
        let bands = band_ranges(input.height(), self.rows_per_band(input.height()));
        let number_of_bands = bands.len();
        log::debug!(
            "Dispatching {} bands to {} threads",
            number_of_bands,
            self.number_of_threads()
        );

        let input = Arc::new(input.clone());
        let (sender, receiver) = mpsc::channel();
        for rows in bands {
            // allocated here so that jobs cannot fail
            let mut band = Raster::new(input.width(), rows.len())?;
            let input = Arc::clone(&input);
            let sender = sender.clone();
            self.threadpool.execute(move || {
                let first_row = rows.start;
                blur_rows(&input, rows, &mut band);
                let _ = sender.send((first_row, band));
            });
        }
        drop(sender);

        let mut received = 0;
        for (first_row, band) in receiver.iter() {
            output.paste_rows(first_row, &band);
            received += 1;
        }
        assert_eq!(
            received,
            number_of_bands,
            "{} of {} bands were lost to panicking blur workers",
            number_of_bands - received,
            number_of_bands
        );
        Ok(())
    }
}
