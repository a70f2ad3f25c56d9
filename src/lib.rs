use std::path::PathBuf;

pub use blur::{blur, blur_with, BlurExecutor, PooledExecutor, SequentialExecutor};
pub use cli::{CLIParser, ExecutorKind};
pub use error::Error;
pub use raster::{codec, Pixel, Raster};

use profiler::Profiler;

pub mod blur;
mod cli;
mod error;
mod logger;
pub mod profiler;
pub mod raster;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    number_of_threads: usize,
    executor: ExecutorKind,
}

pub struct BlurOptions {
    pub executor: ExecutorKind,
    pub number_of_threads: usize,
}

impl From<&Arguments> for BlurOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            executor: value.executor,
            number_of_threads: value.number_of_threads,
        }
    }
}

impl BlurOptions {
    pub fn create_executor(&self) -> Box<dyn BlurExecutor> {
        match self.executor {
            ExecutorKind::Sequential => {
                log::info!("Blurring on the calling thread");
                Box::new(SequentialExecutor)
            }
            ExecutorKind::Pooled => {
                log::info!("Blurring on {} threads", self.number_of_threads);
                Box::new(PooledExecutor::new(self.number_of_threads))
            }
        }
    }
}

/// Decodes the input file, blurs it and writes the result as PNG.
pub fn blur_image_file(arguments: &Arguments) -> Result<()> {
    let mut profiler = Profiler::new();

    profiler.step("Reading input image");
    let input = codec::decode(&arguments.input_file)?;

    profiler.step("Blurring image");
    let executor = BlurOptions::from(arguments).create_executor();
    let output = blur_with(executor.as_ref(), &input)?;

    profiler.step("Writing output image");
    codec::encode_png(&output, &arguments.output_file)?;
    profiler.finish();
    Ok(())
}
