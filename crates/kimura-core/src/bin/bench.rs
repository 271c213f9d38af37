/// Pure Rust benchmarks for the Kimura model.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use log::info;

use kimura_core::batch::{bounds_sweep, run_batch};
use kimura_core::forcing::RainfallSeries;
use kimura_core::kimura::params::Parameters;
use kimura_core::kimura::run as kimura_run;

const REPEATS: usize = 7;
const DT: f64 = 0.25;

/// Simple LCG PRNG for deterministic data generation.
///
/// Hourly storm record: dry hours between bursts of rain.
fn make_rainfall(n: usize, seed: u64) -> RainfallSeries {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let time: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let intensity: Vec<f64> = (0..n)
        .map(|_| {
            let u = next_f64();
            if u < 0.6 {
                0.0
            } else {
                next_f64() * 30.0
            }
        })
        .collect();
    match RainfallSeries::new(time, intensity) {
        Ok(series) => series,
        Err(e) => panic!("generated rainfall is invalid: {e}"),
    }
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_simulate(params: &Parameters, sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let rain = make_rainfall(n, 42);

        // Warmup
        let _ = black_box(kimura_run::simulate(params, &rain, DT));

        let dur = median_time(|| {
            let _ = black_box(kimura_run::simulate(params, &rain, DT));
        });
        results.push(("simulate", n, dur));
    }
    results
}

fn bench_batch(sizes: &[usize], n_sets: usize) -> Vec<(&'static str, usize, Duration)> {
    let sets = match bounds_sweep(n_sets) {
        Ok(sets) => sets,
        Err(e) => panic!("parameter sweep is invalid: {e}"),
    };
    let mut results = Vec::new();

    for &n in sizes {
        let rain = make_rainfall(n, 7);

        let dur = median_time(|| {
            black_box(run_batch(&rain, DT, &sets));
        });
        results.push(("batch", n, dur));
    }
    results
}

fn main() {
    pretty_env_logger::init();

    let params = match Parameters::shared(20.0, 0.6, 50.0) {
        Ok(p) => p,
        Err(e) => panic!("benchmark parameters are invalid: {e}"),
    };

    println!("Kimura Storage-Function Benchmarks (dt = {DT} hr)");
    println!("============================================================");
    println!("{:<18} {:>8}   {:>12}", "Case", "Hours", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();

    all_results.extend(bench_simulate(&params, &[1_000, 10_000, 100_000]));
    all_results.extend(bench_batch(&[1_000, 10_000], 32));
    info!("collected {} timings", all_results.len());

    for (case, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>8}      {:>8.2}", case, n, ms);
    }

    println!("============================================================");
}
