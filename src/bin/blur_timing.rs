use std::thread;
use std::time::{Duration, Instant};

use box_blur::{blur_with, BlurExecutor, Pixel, PooledExecutor, Raster, SequentialExecutor};

const IMAGE_WIDTH: usize = 1920;
const IMAGE_HEIGHT: usize = 1080;
const NUMBER_OF_ROUNDS: u32 = 5;

fn create_test_image() -> box_blur::Result<Raster> {
    let mut raster = Raster::new(IMAGE_WIDTH, IMAGE_HEIGHT)?;
    for row in 0..IMAGE_HEIGHT {
        for col in 0..IMAGE_WIDTH {
            let value = ((col + row * 8) % 256) as u8;
            raster.set(row, col, Pixel::new(value, 255 - value, (row % 256) as u8));
        }
    }
    Ok(raster)
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

fn time_executor(name: &str, executor: &dyn BlurExecutor, image: &Raster) -> box_blur::Result<()> {
    println!("Starting {} blur", name);
    let mut durations: Vec<Duration> = Vec::new();

    for round in 1..=NUMBER_OF_ROUNDS {
        let start = Instant::now();
        blur_with(executor, image)?;
        let duration = start.elapsed();
        println!(
            "Finished round {} after {} microseconds",
            round,
            duration.as_micros(),
        );
        durations.push(duration);
    }

    let min_duration = durations.iter().min().copied().unwrap_or_default();
    let max_duration = durations.iter().max().copied().unwrap_or_default();
    let avg_duration = durations.iter().sum::<Duration>() / NUMBER_OF_ROUNDS;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, &durations);

    println!(
        "{}: Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        name,
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
    Ok(())
}

fn main() -> box_blur::Result<()> {
    println!("Creating {}x{} test image", IMAGE_WIDTH, IMAGE_HEIGHT);
    let image = create_test_image()?;
    let number_of_threads = thread::available_parallelism().map_or(1, |n| n.get());

    time_executor("Sequential", &SequentialExecutor, &image)?;
    let pooled = PooledExecutor::new(number_of_threads);
    time_executor(&format!("Pooled ({} threads)", number_of_threads), &pooled, &image)
}
