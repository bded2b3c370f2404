//! Portable touch samples and pen-versus-finger classification.
//!
//! Classification is best-effort: platforms report force, pressure and
//! contact geometry inconsistently, so missing fields fall back to timing
//! heuristics and ambiguous touches are treated as fingers.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Platform-neutral metadata attached to each touch event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchSample {
    /// Number of simultaneous contacts, if known.
    pub touch_count: Option<u32>,
    /// Normalized force reported by the platform.
    pub force: Option<f64>,
    /// Stylus pressure reported by the platform.
    pub pressure: Option<f64>,
    /// Contact area in px².
    pub contact_area: Option<f64>,
    /// Event timestamp in milliseconds.
    pub timestamp_ms: u64,
    /// When the contact first touched down, if the host delivers the start late.
    pub contact_started_ms: Option<u64>,
}

impl TouchSample {
    /// Sample carrying only a timestamp.
    pub fn at(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            ..Self::default()
        }
    }

    pub fn with_touch_count(mut self, count: u32) -> Self {
        self.touch_count = Some(count);
        self
    }

    pub fn with_force(mut self, force: f64) -> Self {
        self.force = Some(force);
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_contact_area(mut self, area: f64) -> Self {
        self.contact_area = Some(area);
        self
    }

    /// Contact area of an elliptical touch from its radii.
    pub fn with_radii(self, major: f64, minor: f64) -> Self {
        self.with_contact_area(PI * major * minor)
    }

    pub fn with_contact_started(mut self, started_ms: u64) -> Self {
        self.contact_started_ms = Some(started_ms);
        self
    }

    /// First positive force or pressure reading.
    pub fn detected_pressure(&self) -> Option<f64> {
        positive(self.force).or_else(|| positive(self.pressure))
    }

    /// How long the contact has been held, zero when unknown.
    pub fn hold_duration_ms(&self) -> u64 {
        self.contact_started_ms
            .map(|started| self.timestamp_ms.saturating_sub(started))
            .unwrap_or(0)
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Result of classifying a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchKind {
    /// Drawing instrument; the touch may draw or erase.
    Pen,
    /// Incidental contact (palm, finger); the touch is ignored.
    Finger,
}

/// Tunables for pen detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// When false every single touch is accepted.
    pub enabled: bool,
    /// Touch-starts this soon after the last accepted one look like finger
    /// taps.
    pub debounce_ms: u64,
    /// Contacts held longer than this look like a pen.
    pub hold_ms: u64,
    /// Contact areas below this (px²) look like a pen tip.
    pub small_area_threshold: f64,
}

impl ClassifierConfig {
    /// Short windows for screens where the pen is the main input.
    pub fn responsive() -> Self {
        Self {
            enabled: true,
            debounce_ms: 50,
            hold_ms: 100,
            small_area_threshold: 50.0,
        }
    }

    /// Longer windows for screens that are mostly scrolled with fingers.
    pub fn strict() -> Self {
        Self {
            debounce_ms: 200,
            hold_ms: 300,
            ..Self::responsive()
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::responsive()
    }
}

/// Stateful pen-versus-finger classifier for touch-starts.
#[derive(Debug, Clone, Default)]
pub struct InputClassifier {
    config: ClassifierConfig,
    last_touch_start_ms: Option<u64>,
}

impl InputClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            last_touch_start_ms: None,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a touch-start.
    ///
    /// Only accepted (pen) touches restart the debounce window, so a
    /// rejected finger tap never delays the stylus touch after it.
    pub fn classify(&mut self, sample: &TouchSample) -> TouchKind {
        let since_last = self
            .last_touch_start_ms
            .map(|last| sample.timestamp_ms.saturating_sub(last));

        let kind = if self.config.enabled {
            classify_touch(&self.config, sample, since_last)
        } else if sample.touch_count.is_some_and(|count| count > 1) {
            TouchKind::Finger
        } else {
            TouchKind::Pen
        };

        if kind == TouchKind::Pen {
            self.last_touch_start_ms = Some(sample.timestamp_ms);
        }
        log::debug!("Touch at {}ms classified as {:?}", sample.timestamp_ms, kind);
        kind
    }

    /// Forget the previous touch-start.
    pub fn reset(&mut self) {
        self.last_touch_start_ms = None;
    }
}

/// Pure classification rules; the first matching rule wins.
///
/// `since_last_start_ms` is `None` when there was no earlier touch-start.
pub fn classify_touch(
    config: &ClassifierConfig,
    sample: &TouchSample,
    since_last_start_ms: Option<u64>,
) -> TouchKind {
    if sample.touch_count.is_some_and(|count| count > 1) {
        return TouchKind::Finger;
    }

    if sample.detected_pressure().is_some() {
        return TouchKind::Pen;
    }

    if sample
        .contact_area
        .is_some_and(|area| area.is_finite() && area < config.small_area_threshold)
    {
        return TouchKind::Pen;
    }

    if since_last_start_ms.is_some_and(|elapsed| elapsed < config.debounce_ms) {
        return TouchKind::Finger;
    }

    if sample.hold_duration_ms() > config.hold_ms {
        return TouchKind::Pen;
    }

    TouchKind::Finger
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClassifierConfig {
        ClassifierConfig::responsive()
    }

    #[test]
    fn test_multi_touch_is_finger() {
        let sample = TouchSample::at(1000)
            .with_touch_count(2)
            .with_force(1.0)
            .with_pressure(1.0)
            .with_contact_area(1.0)
            .with_contact_started(0);

        assert_eq!(classify_touch(&config(), &sample, None), TouchKind::Finger);
        assert_eq!(classify_touch(&config(), &sample, Some(10_000)), TouchKind::Finger);
    }

    #[test]
    fn test_force_or_pressure_is_pen() {
        let forced = TouchSample::at(0).with_force(0.4);
        let pressed = TouchSample::at(0).with_pressure(0.4);

        assert_eq!(classify_touch(&config(), &forced, Some(0)), TouchKind::Pen);
        assert_eq!(classify_touch(&config(), &pressed, Some(0)), TouchKind::Pen);
    }

    #[test]
    fn test_zero_force_falls_through() {
        let sample = TouchSample::at(0).with_force(0.0).with_pressure(0.0);
        assert_eq!(classify_touch(&config(), &sample, None), TouchKind::Finger);
    }

    #[test]
    fn test_small_contact_area_is_pen() {
        let tip = TouchSample::at(0).with_radii(2.0, 2.0);
        let finger = TouchSample::at(0).with_radii(8.0, 6.0);

        assert_eq!(classify_touch(&config(), &tip, None), TouchKind::Pen);
        assert_eq!(classify_touch(&config(), &finger, None), TouchKind::Finger);
    }

    #[test]
    fn test_rapid_repeat_is_finger() {
        let held = TouchSample::at(1000).with_contact_started(500);

        assert_eq!(classify_touch(&config(), &held, Some(20)), TouchKind::Finger);
        assert_eq!(classify_touch(&config(), &held, Some(60)), TouchKind::Pen);
    }

    #[test]
    fn test_hold_duration() {
        let short = TouchSample::at(1000).with_contact_started(950);
        let long = TouchSample::at(1000).with_contact_started(850);

        assert_eq!(classify_touch(&config(), &short, None), TouchKind::Finger);
        assert_eq!(classify_touch(&config(), &long, None), TouchKind::Pen);
        assert_eq!(classify_touch(&ClassifierConfig::strict(), &long, None), TouchKind::Finger);
    }

    #[test]
    fn test_no_metadata_is_finger() {
        assert_eq!(classify_touch(&config(), &TouchSample::at(0), None), TouchKind::Finger);
    }

    #[test]
    fn test_classifier_tracks_previous_start() {
        let mut classifier = InputClassifier::new(config());
        let held = |t: u64| TouchSample::at(t).with_contact_started(t - 200);

        assert_eq!(classifier.classify(&held(1000)), TouchKind::Pen);
        // Second start 30ms later trips the debounce window.
        assert_eq!(classifier.classify(&held(1030)), TouchKind::Finger);
        assert_eq!(classifier.classify(&held(2000)), TouchKind::Pen);

        classifier.reset();
        assert_eq!(classifier.classify(&held(2010)), TouchKind::Pen);
    }

    #[test]
    fn test_rejected_touch_does_not_restart_debounce() {
        let mut classifier = InputClassifier::new(config());

        assert_eq!(classifier.classify(&TouchSample::at(1000)), TouchKind::Finger);
        // Within 50ms of the rejected tap, but no pen touch came before it.
        let held = TouchSample::at(1020).with_contact_started(800);
        assert_eq!(classifier.classify(&held), TouchKind::Pen);

        // A pen touch does restart the window.
        let again = TouchSample::at(1040).with_contact_started(800);
        assert_eq!(classifier.classify(&again), TouchKind::Finger);
    }

    #[test]
    fn test_disabled_accepts_single_touch() {
        let mut classifier = InputClassifier::new(ClassifierConfig {
            enabled: false,
            ..config()
        });

        assert_eq!(classifier.classify(&TouchSample::at(0)), TouchKind::Pen);
        assert_eq!(
            classifier.classify(&TouchSample::at(1).with_touch_count(2)),
            TouchKind::Finger
        );
    }

    #[test]
    fn test_detected_pressure_prefers_force() {
        let sample = TouchSample::at(0).with_force(0.8).with_pressure(0.3);
        assert_eq!(sample.detected_pressure(), Some(0.8));

        let sample = TouchSample::at(0).with_force(0.0).with_pressure(0.3);
        assert_eq!(sample.detected_pressure(), Some(0.3));
    }
}
