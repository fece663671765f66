/// ============================================================
///  Heuristic Solar Potential Model
///
///  Pipeline:
///   1. Hourly estimate – radiation × panel area × efficiency ×
///                        system losses × temperature derating
///   2. Daily summary   – group hours by calendar date, keep the
///                        first MAX_SUMMARY_DAYS days
///
///  Pure functions: no I/O, no shared state.
/// ============================================================

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::forecast::{DailySummary, HourlyEstimate, WeatherSeries};

// ─── Reference system constants ──────────────────────────────
/// ~5 kWp residential array
pub const PANEL_AREA_M2: f64 = 28.0;
pub const PANEL_EFFICIENCY: f64 = 0.18;
/// Inverter, wiring and soiling losses
pub const SYSTEM_LOSSES: f64 = 0.85;

const STC_TEMP_C: f64 = 25.0;
const TEMP_DERATE_PER_C: f64 = 0.005;

pub const MAX_SUMMARY_DAYS: usize = 3;

/// Rounds the exact binary value to a fixed number of decimals, halves away
/// from zero. Scaling by 10^n first would push values such as 0.5355
/// (stored as 0.53549999…) onto the midpoint, so no float multiplication here.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => exact
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        None => value,
    }
}

/// Efficiency multiplier for the given ambient temperature.
///
/// Only temperatures above 25 °C derate the panel. The result is not
/// clamped and turns negative above 225 °C; the final power clamp handles it.
#[inline]
pub fn temperature_coefficient(temp_c: f64) -> f64 {
    1.0 - ((temp_c - STC_TEMP_C) * TEMP_DERATE_PER_C).max(0.0)
}

/// Raw power (kW) before rounding, clamped to be non-negative.
pub fn solar_potential_kw(radiation_w_m2: f64, temp_c: f64) -> f64 {
    let radiation_kw = radiation_w_m2 / 1000.0;
    let potential = radiation_kw
        * PANEL_AREA_M2
        * PANEL_EFFICIENCY
        * SYSTEM_LOSSES
        * temperature_coefficient(temp_c);

    // positive zero for clamped or -0.0 results
    if potential > 0.0 { potential } else { 0.0 }
}

/// Maps every hour of the series to an estimate, index-aligned with `series.time`.
///
/// Missing radiation / cloud cover read as 0, missing temperature as 20 °C.
pub fn estimate_hourly(series: &WeatherSeries) -> Vec<HourlyEstimate> {
    series
        .time
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            let radiation = series.radiation_at(i);
            let cloud_cover = series.cloud_cover_at(i);
            // only null/missing reads as 20 °C; a measured 0 °C is kept
            let temperature = series.temperature_at(i);

            let solar_potential = round_to(solar_potential_kw(radiation, temperature), 3);

            #[cfg(feature = "verbose_log")]
            log::debug!(
                "[MODEL] {} | G={:.1} W/m² | T={:.1}°C | cloud={:.0}% | P={:.3} kW",
                ts, radiation, temperature, cloud_cover, solar_potential
            );

            HourlyEstimate {
                timestamp: ts.clone(),
                solar_potential,
                temperature,
                cloud_cover,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct DayAccumulator {
    sum_potential: f64,
    max_potential: f64,
    sum_cloud_cover: f64,
    count: usize,
}

/// Date portion of an ISO-8601 timestamp; no parsing or timezone handling.
#[inline]
pub fn date_key(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(date, _)| date)
}

/// Groups hourly estimates by date in first-seen order and summarises the
/// first `MAX_SUMMARY_DAYS` days.
pub fn aggregate_daily(hourly: &[HourlyEstimate]) -> Vec<DailySummary> {
    let mut days: Vec<(&str, DayAccumulator)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for h in hourly {
        let key = date_key(&h.timestamp);
        let slot = *index.entry(key).or_insert_with(|| {
            days.push((key, DayAccumulator::default()));
            days.len() - 1
        });

        let acc = &mut days[slot].1;
        acc.sum_potential += h.solar_potential;
        acc.sum_cloud_cover += h.cloud_cover;
        acc.count += 1;
        if h.solar_potential > acc.max_potential {
            acc.max_potential = h.solar_potential;
        }
    }

    days.into_iter()
        .take(MAX_SUMMARY_DAYS)
        .map(|(date, acc)| {
            let n = acc.count as f64;
            DailySummary {
                date: date.to_string(),
                avg_potential: round_to(acc.sum_potential / n, 3),
                max_potential: round_to(acc.max_potential, 3),
                // half rounds toward +inf
                avg_cloud_cover: (acc.sum_cloud_cover / n + 0.5).floor() as i64,
                hour_count: acc.count,
            }
        })
        .collect()
}
