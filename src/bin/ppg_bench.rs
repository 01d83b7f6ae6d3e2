use std::error::Error;

use chrono::Utc;
use slog::{info, Logger};

use ppgcore::bench::{measure, MetricTotals};
use ppgcore::deployments;
use ppgcore::log::create_logger;
use ppgcore::mock::{delayed, SyntheticPulse};
use ppgcore::Analysis;

const PTT_REPEATS: u32 = 1000;
const HR_REPEATS: u32 = 100;

fn main() -> Result<(), Box<dyn Error>> {
    let logger = create_logger("bench");
    info!(logger, "starting benchmark"; "at" => Utc::now().to_rfc3339());

    wrist_finger_ptt(&logger)?;
    moving_average_hr(&logger)?;
    fir_low_pass_hr(&logger)?;

    Ok(())
}

fn wrist_finger_ptt(logger: &Logger) -> Result<(), Box<dyn Error>> {
    let params = deployments::wrist_finger_ptt();
    let wrist = SyntheticPulse::wrist(params.sampling_frequency).generate(500);
    // 50 ms downstream
    let delay = (0.05 * params.sampling_frequency) as usize;
    let finger = delayed(wrist.view(), delay);

    let analysis = Analysis::new(params)?.with_logger(logger.new(slog::o!("deployment" => "ptt")));
    log_parameters(logger, &analysis);

    let mut totals = MetricTotals::default();
    let (_, timing) = measure(PTT_REPEATS, || {
        let results = analysis.analyze_pair(wrist.view(), finger.view());
        totals.add(&results.metrics);
    });

    let mean = totals.mean();
    info!(logger, "wrist/finger results";
        "samples" => wrist.len(),
        "runs" => totals.runs,
        "mean_heart_rate" => mean.heart_rate,
        "mean_ptt" => mean.pulse_transit_time,
        "mean_blood_pressure" => mean.blood_pressure);
    timing.log(logger, "wrist_finger_ptt");
    Ok(())
}

fn moving_average_hr(logger: &Logger) -> Result<(), Box<dyn Error>> {
    let params = deployments::moving_average_hr();
    let signal = SyntheticPulse {
        sampling_frequency: params.sampling_frequency,
        pulse_frequency: 1.0,
        offset: 0.5,
        amplitude: 0.5,
        ripple_frequency: 0.0,
        ripple_amplitude: 0.0,
    }
    .generate(100);

    let analysis = Analysis::new(params)?;
    log_parameters(logger, &analysis);

    let mut totals = MetricTotals::default();
    let (results, timing) = measure(HR_REPEATS, || {
        let results = analysis.analyze(signal.view());
        totals.add(&results.metrics);
        results
    });

    let mean = totals.mean();
    info!(logger, "moving average results";
        "samples" => signal.len(),
        "peaks" => results.peaks.len(),
        "runs" => totals.runs,
        "mean_heart_rate" => mean.heart_rate,
        "mean_blood_pressure" => mean.blood_pressure);
    timing.log(logger, "moving_average_hr");
    Ok(())
}

fn fir_low_pass_hr(logger: &Logger) -> Result<(), Box<dyn Error>> {
    let params = deployments::fir_low_pass_hr();
    let signal = SyntheticPulse {
        amplitude: 0.4,
        ..SyntheticPulse::wrist(params.sampling_frequency)
    }
    .generate(100);

    let analysis = Analysis::new(params)?;
    log_parameters(logger, &analysis);

    let mut totals = MetricTotals::default();
    let (results, timing) = measure(HR_REPEATS, || {
        let results = analysis.analyze(signal.view());
        totals.add(&results.metrics);
        results
    });

    let mean = totals.mean();
    info!(logger, "FIR low-pass results";
        "samples" => signal.len(),
        "taps" => deployments::LOW_PASS_TAPS.len(),
        "peaks" => results.peaks.len(),
        "runs" => totals.runs,
        "mean_heart_rate" => mean.heart_rate,
        "mean_blood_pressure" => mean.blood_pressure);
    timing.log(logger, "fir_low_pass_hr");
    Ok(())
}

fn log_parameters(logger: &Logger, analysis: &Analysis) {
    let params = analysis.params();
    info!(logger, "deployment parameters";
        "sampling_frequency" => params.sampling_frequency,
        "threshold" => params.peak_threshold,
        "capacity" => params.peak_capacity,
        "guard_samples" => analysis.guard_samples(),
        "estimator" => ?params.heart_rate_estimator);
}
