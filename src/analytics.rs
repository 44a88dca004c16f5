//! Pure statistical analysis over ordered sensor readings.
//!
//! Every function here is stateless and total: given fewer points than the
//! analysis needs, it returns an explicit "unknown" sentinel (or an empty
//! list) instead of erroring. Callers treat those sentinels as valid
//! results. Input series are oldest-to-newest; the regression runs over the
//! sequence index, not wall-clock time.

use serde::Serialize;

use crate::models::Reading;

// ---

/// Slope threshold for the temperature-specific trend call site.
pub const TEMP_SLOPE_THRESHOLD: f64 = 0.1;
/// Slope threshold for the generic (pressure/humidity) trend call sites.
pub const GENERIC_SLOPE_THRESHOLD: f64 = 0.05;

/// Mean absolute step-to-step humidity change above which the pattern text
/// gains a fluctuation note, in percentage points.
const FLUCTUATION_THRESHOLD: f64 = 15.0;

/// Short-window pressure swing considered a storm indicator, in hPa.
const PRESSURE_SWING_THRESHOLD: f64 = 6.0;

/// Minimum points before anomaly detection produces anything.
const ANOMALY_MIN_POINTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
    Unknown,
}

/// Linear-regression summary of one numeric series.
#[derive(Debug, Clone, Serialize)]
pub struct TrendResult {
    pub trend: TrendDirection,
    /// Percent change from first to last value, as a magnitude.
    pub magnitude: f64,
    /// 0–100, from the regression R²; not a p-value.
    pub confidence: f64,
    pub slope: f64,
}

impl TrendResult {
    fn unknown() -> Self {
        // ---
        TrendResult {
            trend: TrendDirection::Unknown,
            magnitude: 0.0,
            confidence: 0.0,
            slope: 0.0,
        }
    }
}

/// Fit an ordinary-least-squares line over the series index and classify
/// the slope against `slope_threshold`.
///
/// Confidence is `min(R² × 100, 100)`; a zero-variance (constant) series
/// has no explainable variance, so confidence is defined as 0 rather than
/// dividing by zero. Magnitude is the percent change from first to last
/// value, 0 when the first value is 0. Fewer than 2 points yields the
/// `Unknown` sentinel.
pub fn analyze_trend(values: &[f64], slope_threshold: f64) -> TrendResult {
    // ---
    if values.len() < 2 {
        return TrendResult::unknown();
    }

    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    // The index denominator n·Σx² - (Σx)² is strictly positive for n ≥ 2.
    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    let mean = sum_y / n;

    let mut total_variation = 0.0;
    let mut explained_variation = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let prediction = slope * i as f64 + intercept;
        total_variation += (y - mean).powi(2);
        explained_variation += (prediction - mean).powi(2);
    }

    let confidence = if total_variation == 0.0 {
        0.0
    } else {
        let r_squared = (explained_variation / total_variation).min(1.0);
        (r_squared * 100.0).min(100.0)
    };

    let trend = if slope > slope_threshold {
        TrendDirection::Rising
    } else if slope < -slope_threshold {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };

    let first = values[0];
    let last = values[values.len() - 1];
    let magnitude = if first == 0.0 {
        0.0
    } else {
        ((last - first) / first.abs() * 100.0).abs()
    };

    TrendResult {
        trend,
        magnitude,
        confidence,
        slope,
    }
}

/// Temperature trend with the temperature-specific ±0.1 slope threshold.
pub fn analyze_temperature_trend(temperatures: &[f64]) -> TrendResult {
    analyze_trend(temperatures, TEMP_SLOPE_THRESHOLD)
}

// ---

/// Barometric weather prediction derived from the pressure trend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureInsight {
    pub prediction: String,
    pub confidence: f64,
    pub trend: TrendDirection,
    pub current_pressure: f64,
}

/// Predict weather from the pressure series (generic ±0.05 threshold).
///
/// Rising pressure reads as improving weather, sharpened to "clear and
/// fair" above 1022 hPa. Falling pressure reads as changing weather,
/// sharpened to storms below 1000 hPa with a +15 confidence boost. A flat
/// trend at the extremes (below 995 / above 1025) gets its own label and a
/// +10 boost. All boosts cap at 100. Fewer than 3 points yields the
/// unknown sentinel.
pub fn analyze_pressure(pressures: &[f64]) -> PressureInsight {
    // ---
    let current_pressure = pressures.last().copied().unwrap_or(0.0);

    if pressures.len() < 3 {
        return PressureInsight {
            prediction: "unknown".to_string(),
            confidence: 0.0,
            trend: TrendDirection::Unknown,
            current_pressure,
        };
    }

    let trend = analyze_trend(pressures, GENERIC_SLOPE_THRESHOLD);
    let mut prediction = "stable weather";
    let mut confidence = trend.confidence;

    match trend.trend {
        TrendDirection::Rising => {
            prediction = "improving weather conditions";
            if current_pressure > 1022.0 {
                prediction = "clear and fair weather approaching";
            }
        }
        TrendDirection::Falling => {
            prediction = "changing weather conditions";
            if current_pressure < 1000.0 {
                prediction = "rain or storms may be approaching";
                confidence = (confidence + 15.0).min(100.0);
            }
        }
        _ => {
            if current_pressure < 995.0 {
                prediction = "potential stormy conditions";
                confidence = (confidence + 10.0).min(100.0);
            } else if current_pressure > 1025.0 {
                prediction = "continued fair weather";
                confidence = (confidence + 10.0).min(100.0);
            }
        }
    }

    PressureInsight {
        prediction: prediction.to_string(),
        confidence,
        trend: trend.trend,
        current_pressure,
    }
}

// ---

/// Humidity pattern and comfort classification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HumidityInsight {
    pub pattern: String,
    pub comfort: &'static str,
    pub confidence: f64,
    pub current_humidity: f64,
}

/// Classify the humidity series (generic ±0.05 threshold).
///
/// Comfort is `dry` below 30 %, `humid` above 70 %, otherwise
/// `comfortable`. The pattern text follows the trend direction and gains
/// "with significant fluctuations" when the mean absolute step change
/// exceeds 15 percentage points. Fewer than 2 points yields the unknown
/// sentinel.
pub fn analyze_humidity(humidities: &[f64]) -> HumidityInsight {
    // ---
    let current_humidity = humidities.last().copied().unwrap_or(0.0);

    if humidities.len() < 2 {
        return HumidityInsight {
            pattern: "unknown".to_string(),
            comfort: "unknown",
            confidence: 0.0,
            current_humidity,
        };
    }

    let trend = analyze_trend(humidities, GENERIC_SLOPE_THRESHOLD);

    let comfort = if current_humidity < 30.0 {
        "dry"
    } else if current_humidity > 70.0 {
        "humid"
    } else {
        "comfortable"
    };

    let mut pattern = match trend.trend {
        TrendDirection::Rising => "increasing humidity",
        TrendDirection::Falling => "decreasing humidity",
        _ => "stable humidity",
    }
    .to_string();

    if mean_step_change(humidities) > FLUCTUATION_THRESHOLD {
        pattern.push_str(" with significant fluctuations");
    }

    HumidityInsight {
        pattern,
        comfort,
        confidence: trend.confidence,
        current_humidity,
    }
}

/// Mean absolute change between consecutive values.
fn mean_step_change(values: &[f64]) -> f64 {
    // ---
    if values.len() < 2 {
        return 0.0;
    }
    let total: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    total / (values.len() - 1) as f64
}

// ---

/// Agreement between a local sensor series and an external reference.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationResult {
    /// Absolute Pearson coefficient, 0–1.
    pub correlation: f64,
    pub description: String,
    /// Mean absolute difference between paired values.
    pub difference: f64,
}

/// Pearson correlation between two series paired by index position.
///
/// The series are truncated to the shorter length before pairing; no
/// timestamp alignment is attempted, which is a known approximation when
/// sample rates differ. Zero variance on either side yields coefficient 0.
/// Fewer than 2 paired points yields the insufficient-data sentinel.
pub fn correlate(local: &[f64], external: &[f64], metric: &str) -> CorrelationResult {
    // ---
    let n = local.len().min(external.len());
    if n < 2 {
        return CorrelationResult {
            correlation: 0.0,
            description: "insufficient data".to_string(),
            difference: 0.0,
        };
    }

    let local = &local[..n];
    let external = &external[..n];

    let r = pearson(local, external);
    let abs_r = r.abs();

    let description = if abs_r > 0.8 {
        format!("sensor {metric} readings closely match external data")
    } else if abs_r > 0.5 {
        format!("sensor {metric} shows moderate agreement with external data")
    } else if abs_r > 0.3 {
        format!("sensor {metric} shows some agreement with external data")
    } else {
        format!("sensor {metric} differs significantly from external data")
    };

    let difference = local
        .iter()
        .zip(external)
        .map(|(a, b)| (a - b).abs())
        .sum::<f64>()
        / n as f64;

    CorrelationResult {
        correlation: abs_r,
        description,
        difference,
    }
}

/// Pearson coefficient of two equal-length series; 0 when either has zero
/// variance.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    // ---
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denom_a = 0.0;
    let mut denom_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        numerator += dx * dy;
        denom_a += dx * dx;
        denom_b += dy * dy;
    }

    if denom_a == 0.0 || denom_b == 0.0 {
        return 0.0;
    }
    numerator / (denom_a * denom_b).sqrt()
}

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Temperature,
    Pressure,
    Humidity,
}

/// One statistically unusual reading or short-term change.
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub description: String,
    pub confidence: f64,
}

/// Flag anomalies in the most recent readings.
///
/// Needs at least 5 points; shorter input returns an empty list, which is
/// a valid outcome, not an error. Each check runs independently and the
/// types may co-occur:
/// - temperature more than 2 population standard deviations from the mean
///   (a constant series has σ = 0 and flags nothing),
/// - a pressure swing above 6 hPa between the latest reading and the one
///   two steps back,
/// - humidity above 95 % (precipitation likely) or below 20 % (extremely
///   dry).
pub fn detect_anomalies(readings: &[Reading]) -> Vec<Anomaly> {
    // ---
    if readings.len() < ANOMALY_MIN_POINTS {
        return Vec::new();
    }

    let temperatures: Vec<f64> = readings.iter().map(|r| r.temperature).collect();
    let humidities: Vec<f64> = readings.iter().map(|r| r.humidity).collect();
    let pressures: Vec<f64> = readings.iter().map(|r| r.pressure).collect();

    let mut anomalies = Vec::new();

    let (mean, std_dev) = mean_and_std_dev(&temperatures);
    let latest_temp = temperatures[temperatures.len() - 1];
    if std_dev > 0.0 && (latest_temp - mean).abs() > 2.0 * std_dev {
        let deviations = (latest_temp - mean).abs() / std_dev;
        anomalies.push(Anomaly {
            kind: AnomalyKind::Temperature,
            description: format!("Unusual temperature reading of {latest_temp:.1}°C"),
            confidence: (deviations * 25.0).min(95.0),
        });
    }

    let swing = pressures[pressures.len() - 1] - pressures[pressures.len() - 3];
    if swing.abs() > PRESSURE_SWING_THRESHOLD {
        let direction = if swing > 0.0 { "increase" } else { "decrease" };
        anomalies.push(Anomaly {
            kind: AnomalyKind::Pressure,
            description: format!("Rapid pressure {direction} of {:.1} hPa", swing.abs()),
            confidence: (swing.abs() * 5.0).min(95.0),
        });
    }

    let latest_humidity = humidities[humidities.len() - 1];
    if latest_humidity > 95.0 {
        anomalies.push(Anomaly {
            kind: AnomalyKind::Humidity,
            description: "Very high humidity, precipitation likely".to_string(),
            confidence: 85.0,
        });
    } else if latest_humidity < 20.0 {
        anomalies.push(Anomaly {
            kind: AnomalyKind::Humidity,
            description: "Extremely dry conditions".to_string(),
            confidence: 90.0,
        });
    }

    anomalies
}

/// Population mean and standard deviation.
fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    // ---
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::DeviceInfo;

    fn sample(temperature: f64, humidity: f64, pressure: f64) -> Reading {
        // ---
        let now = Utc::now();
        Reading {
            id: Uuid::new_v4(),
            temperature,
            humidity,
            pressure,
            timestamp: now,
            device: DeviceInfo {
                id: "pi-1".to_string(),
                name: "Raspberry Pi SenseHat".to_string(),
                location: "Unknown".to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn samples(points: &[(f64, f64, f64)]) -> Vec<Reading> {
        points.iter().map(|&(t, h, p)| sample(t, h, p)).collect()
    }

    // --- trend ---

    #[test]
    fn strictly_increasing_series_is_rising() {
        // ---
        let result = analyze_trend(&[10.0, 11.0, 12.0, 13.0], TEMP_SLOPE_THRESHOLD);
        assert_eq!(result.trend, TrendDirection::Rising);
        // Perfect linear fit explains all variance
        assert!((result.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn strictly_decreasing_series_is_falling() {
        // ---
        let result = analyze_trend(&[13.0, 12.0, 11.0, 10.0], TEMP_SLOPE_THRESHOLD);
        assert_eq!(result.trend, TrendDirection::Falling);
        assert!(result.slope < 0.0);
    }

    #[test]
    fn constant_series_is_stable_with_zero_confidence() {
        // ---
        let result = analyze_trend(&[20.0, 20.0, 20.0, 20.0, 20.0], TEMP_SLOPE_THRESHOLD);
        assert_eq!(result.trend, TrendDirection::Stable);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.slope, 0.0);
        assert!(!result.confidence.is_nan());
    }

    #[test]
    fn single_point_yields_unknown() {
        // ---
        let result = analyze_trend(&[20.0], TEMP_SLOPE_THRESHOLD);
        assert_eq!(result.trend, TrendDirection::Unknown);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn magnitude_is_percent_change_from_first_to_last() {
        // ---
        let result = analyze_trend(&[10.0, 11.0, 12.0], TEMP_SLOPE_THRESHOLD);
        assert!((result.magnitude - 20.0).abs() < 1e-9);
    }

    #[test]
    fn magnitude_is_zero_when_first_value_is_zero() {
        // ---
        let result = analyze_trend(&[0.0, 5.0, 10.0], TEMP_SLOPE_THRESHOLD);
        assert_eq!(result.magnitude, 0.0);
    }

    #[test]
    fn slope_between_thresholds_depends_on_call_site() {
        // ---
        // Slope of 0.07/step: stable for the temperature threshold (0.1),
        // rising for the generic threshold (0.05).
        let values = [10.0, 10.07, 10.14, 10.21];
        assert_eq!(
            analyze_trend(&values, TEMP_SLOPE_THRESHOLD).trend,
            TrendDirection::Stable
        );
        assert_eq!(
            analyze_trend(&values, GENERIC_SLOPE_THRESHOLD).trend,
            TrendDirection::Rising
        );
    }

    // --- pressure ---

    #[test]
    fn falling_pressure_above_1000_is_changing_without_bonus() {
        // ---
        let result = analyze_pressure(&[1025.0, 1024.0, 1023.0, 1022.0, 1021.0]);
        assert_eq!(result.prediction, "changing weather conditions");
        assert_eq!(result.trend, TrendDirection::Falling);
        assert_eq!(result.current_pressure, 1021.0);
        // Perfect linear fall: confidence is the raw R² with no +15 bonus
        assert!((result.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn falling_pressure_below_1000_predicts_storms_with_bonus() {
        // ---
        let result = analyze_pressure(&[1004.0, 1002.0, 1000.0, 998.0, 996.0]);
        assert_eq!(result.prediction, "rain or storms may be approaching");
        // Bonus caps at 100
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn rising_pressure_above_1022_is_clear_and_fair() {
        // ---
        let result = analyze_pressure(&[1020.0, 1022.0, 1024.0, 1026.0]);
        assert_eq!(result.prediction, "clear and fair weather approaching");
        assert_eq!(result.trend, TrendDirection::Rising);
    }

    #[test]
    fn flat_low_pressure_is_potentially_stormy() {
        // ---
        let result = analyze_pressure(&[994.0, 994.0, 994.0, 994.0]);
        assert_eq!(result.prediction, "potential stormy conditions");
        // Flat series has confidence 0, boosted by 10
        assert_eq!(result.confidence, 10.0);
    }

    #[test]
    fn flat_high_pressure_is_continued_fair() {
        // ---
        let result = analyze_pressure(&[1026.0, 1026.0, 1026.0, 1026.0]);
        assert_eq!(result.prediction, "continued fair weather");
        assert_eq!(result.confidence, 10.0);
    }

    #[test]
    fn too_few_pressure_points_yield_unknown() {
        // ---
        let result = analyze_pressure(&[1010.0, 1012.0]);
        assert_eq!(result.prediction, "unknown");
        assert_eq!(result.trend, TrendDirection::Unknown);
        assert_eq!(result.current_pressure, 1012.0);
    }

    // --- humidity ---

    #[test]
    fn comfort_bands_classify_latest_value() {
        // ---
        assert_eq!(analyze_humidity(&[50.0, 40.0, 25.0]).comfort, "dry");
        assert_eq!(analyze_humidity(&[50.0, 60.0, 75.0]).comfort, "humid");
        assert_eq!(analyze_humidity(&[50.0, 50.0, 50.0]).comfort, "comfortable");
    }

    #[test]
    fn fluctuating_humidity_gains_pattern_suffix() {
        // ---
        let result = analyze_humidity(&[30.0, 70.0, 30.0, 70.0, 30.0]);
        assert!(result.pattern.ends_with("with significant fluctuations"));
    }

    #[test]
    fn steady_humidity_pattern_has_no_suffix() {
        // ---
        let result = analyze_humidity(&[50.0, 50.02, 49.98, 50.0]);
        assert_eq!(result.pattern, "stable humidity");
    }

    #[test]
    fn single_humidity_point_yields_unknown() {
        // ---
        let result = analyze_humidity(&[50.0]);
        assert_eq!(result.pattern, "unknown");
        assert_eq!(result.comfort, "unknown");
    }

    // --- correlation ---

    #[test]
    fn correlation_is_symmetric() {
        // ---
        let a = [20.0, 21.0, 23.0, 22.0, 25.0];
        let b = [18.0, 20.0, 21.0, 21.5, 24.0];
        let ab = correlate(&a, &b, "temperature");
        let ba = correlate(&b, &a, "temperature");
        assert!((ab.correlation - ba.correlation).abs() < 1e-12);
        assert!((ab.difference - ba.difference).abs() < 1e-12);
    }

    #[test]
    fn self_correlation_is_one() {
        // ---
        let a = [20.0, 21.0, 23.0, 22.0, 25.0];
        let result = correlate(&a, &a, "temperature");
        assert!((result.correlation - 1.0).abs() < 1e-12);
        assert_eq!(result.difference, 0.0);
        assert!(result.description.contains("closely match"));
    }

    #[test]
    fn constant_series_has_zero_correlation() {
        // ---
        let result = correlate(&[20.0, 20.0, 20.0], &[18.0, 21.0, 24.0], "temperature");
        assert_eq!(result.correlation, 0.0);
        assert!(result.description.contains("differs significantly"));
    }

    #[test]
    fn series_are_truncated_to_the_shorter_length() {
        // ---
        let result = correlate(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 2.0, 3.0], "humidity");
        assert!((result.correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fewer_than_two_pairs_is_insufficient_data() {
        // ---
        let result = correlate(&[1.0], &[1.0, 2.0], "humidity");
        assert_eq!(result.description, "insufficient data");
        assert_eq!(result.correlation, 0.0);
    }

    // --- anomalies ---

    #[test]
    fn four_points_return_empty_not_error() {
        // ---
        let readings = samples(&[
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1013.0),
            (80.0, 99.0, 900.0),
        ]);
        assert!(detect_anomalies(&readings).is_empty());
    }

    #[test]
    fn constant_temperature_flags_nothing() {
        // ---
        let readings = samples(&[
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1013.0),
        ]);
        let anomalies = detect_anomalies(&readings);
        assert!(anomalies.iter().all(|a| a.kind != AnomalyKind::Temperature));
    }

    #[test]
    fn temperature_outlier_is_flagged_with_capped_confidence() {
        // ---
        // Nine readings at 20 °C then a jump to 40 °C: mean 22, σ 6, so the
        // latest value sits 3 deviations out.
        let mut points = vec![(20.0, 50.0, 1013.0); 9];
        points.push((40.0, 50.0, 1013.0));
        let anomalies = detect_anomalies(&samples(&points));
        let temp = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Temperature)
            .expect("temperature anomaly");
        assert!(temp.description.contains("40.0"));
        assert!((temp.confidence - 75.0).abs() < 1e-9);
    }

    #[test]
    fn rapid_pressure_drop_is_flagged() {
        // ---
        let readings = samples(&[
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1013.0),
            (20.0, 50.0, 1012.0),
            (20.0, 50.0, 1008.0),
            (20.0, 50.0, 1004.0),
        ]);
        let anomalies = detect_anomalies(&readings);
        let pressure = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Pressure)
            .expect("pressure anomaly");
        assert!(pressure.description.contains("decrease"));
        assert!((pressure.confidence - 40.0).abs() < 1e-9);
    }

    #[test]
    fn extreme_humidity_values_are_flagged() {
        // ---
        let humid = samples(&[
            (20.0, 60.0, 1013.0),
            (20.0, 70.0, 1013.0),
            (20.0, 80.0, 1013.0),
            (20.0, 90.0, 1013.0),
            (20.0, 96.0, 1013.0),
        ]);
        let anomaly = detect_anomalies(&humid)
            .into_iter()
            .find(|a| a.kind == AnomalyKind::Humidity)
            .expect("humidity anomaly");
        assert_eq!(anomaly.confidence, 85.0);

        let dry = samples(&[
            (20.0, 40.0, 1013.0),
            (20.0, 35.0, 1013.0),
            (20.0, 30.0, 1013.0),
            (20.0, 25.0, 1013.0),
            (20.0, 15.0, 1013.0),
        ]);
        let anomaly = detect_anomalies(&dry)
            .into_iter()
            .find(|a| a.kind == AnomalyKind::Humidity)
            .expect("humidity anomaly");
        assert_eq!(anomaly.confidence, 90.0);
    }

    #[test]
    fn multiple_anomaly_types_co_occur() {
        // ---
        let mut points = vec![(20.0, 50.0, 1013.0); 7];
        points.push((20.0, 60.0, 1012.0));
        points.push((20.0, 80.0, 1005.0));
        points.push((40.0, 96.0, 998.0));
        let anomalies = detect_anomalies(&samples(&points));
        let kinds: Vec<_> = anomalies.iter().map(|a| a.kind).collect();
        assert!(kinds.contains(&AnomalyKind::Temperature));
        assert!(kinds.contains(&AnomalyKind::Pressure));
        assert!(kinds.contains(&AnomalyKind::Humidity));
    }
}
