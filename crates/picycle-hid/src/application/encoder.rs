//! ReportEncoder: turns key names, combos, and text into report writes.
//!
//! Every keystroke the encoder emits is a press report followed by the
//! all-zero release report, so no key is ever left held after a call
//! returns (successfully or not, unless the device itself failed mid-pair).
//!
//! # Timing
//!
//! | Phase            | Default | Field                      |
//! |------------------|---------|----------------------------|
//! | key press hold   | 50 ms   | [`TimingConfig::key_press`] |
//! | inter-key gap    | 10 ms   | [`TimingConfig::key_gap`]   |
//! | combo hold       | 100 ms  | [`TimingConfig::combo_hold`] |
//! | per-char hold    | 50 ms   | [`TimingConfig::char_delay`] |
//!
//! All waits go through the injected [`Clock`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use picycle_core::{HidKeyCode, HidReport, KeyMapper, KeymapError, Modifier};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::device::{Clock, DeviceError, HidDevice};

/// Error type for encoder operations.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// The key name (or every token of a combo) is not in the keycode table.
    /// Nothing was written.
    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    #[error(transparent)]
    Device(#[from] DeviceError),

    /// The shared running flag was cleared before the next press.
    #[error("interrupted")]
    Interrupted,
}

impl EncoderError {
    /// `true` for errors a script may log and step over.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EncoderError::UnknownKey(_))
    }
}

impl From<KeymapError> for EncoderError {
    fn from(err: KeymapError) -> Self {
        match err {
            KeymapError::UnknownKey(name) => EncoderError::UnknownKey(name),
        }
    }
}

/// Hold and gap durations used by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub key_press: Duration,
    pub key_gap: Duration,
    pub combo_hold: Duration,
    pub char_delay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            key_press: Duration::from_millis(50),
            key_gap: Duration::from_millis(10),
            combo_hold: Duration::from_millis(100),
            char_delay: Duration::from_millis(50),
        }
    }
}

/// What a single `press_key` call actually sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Keystroke {
    pub modifier: Modifier,
    pub key: Option<HidKeyCode>,
}

/// Result of a combo: the merged press plus any tokens that were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboOutcome {
    pub modifier: Modifier,
    pub key: Option<HidKeyCode>,
    pub unknown: Vec<String>,
}

/// Result of typing a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeOutcome {
    /// Characters that produced a keystroke.
    pub typed: usize,
    /// Characters with no key on the layout, in input order.
    pub skipped: Vec<char>,
}

/// Encodes keystrokes into reports and writes them to an owned device.
pub struct ReportEncoder<D, C> {
    device: D,
    clock: C,
    timing: TimingConfig,
    running: Option<Arc<AtomicBool>>,
}

impl<D: HidDevice, C: Clock> ReportEncoder<D, C> {
    /// Creates an encoder with default timing and no cancellation flag.
    pub fn new(device: D, clock: C) -> Self {
        Self {
            device,
            clock,
            timing: TimingConfig::default(),
            running: None,
        }
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Attaches a shared flag; clearing it makes the next press fail with
    /// [`EncoderError::Interrupted`].
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Returns [`EncoderError::Interrupted`] once the running flag is cleared.
    pub fn check_running(&self) -> Result<(), EncoderError> {
        match &self.running {
            Some(flag) if !flag.load(Ordering::SeqCst) => Err(EncoderError::Interrupted),
            _ => Ok(()),
        }
    }

    /// Writes one report as-is.
    pub fn send(&mut self, report: &HidReport) -> Result<(), EncoderError> {
        debug!(report = %report, "write report");
        self.device.write_report(report)?;
        Ok(())
    }

    /// Writes one all-zero report.
    pub fn release_all(&mut self) -> Result<(), EncoderError> {
        self.send(&HidReport::RELEASE)
    }

    pub fn pause(&mut self, duration: Duration) {
        self.clock.sleep(duration);
    }

    /// Presses and releases a single named key.
    ///
    /// Single-character names follow the typing rules (`"A"` is Shift+a,
    /// `"?"` is Shift+/).  Longer names are matched case-insensitively
    /// against the key table, then against the modifier names, in which case
    /// a modifier-only report is sent.  `extra` is OR-ed into the report.
    ///
    /// # Errors
    ///
    /// [`EncoderError::UnknownKey`] with nothing written if the name does
    /// not resolve; device and interruption errors otherwise.
    pub fn press_key(
        &mut self,
        name: &str,
        extra: Modifier,
        press_duration: Duration,
    ) -> Result<Keystroke, EncoderError> {
        let (modifier, key) = resolve_name(name)?;
        let stroke = Keystroke {
            modifier: modifier | extra,
            key,
        };
        let gap = self.timing.key_gap;
        self.stroke(stroke, press_duration, gap)?;
        Ok(stroke)
    }

    /// [`press_key`](Self::press_key) with no extra modifier and the default hold.
    pub fn tap(&mut self, name: &str) -> Result<Keystroke, EncoderError> {
        let hold = self.timing.key_press;
        self.press_key(name, Modifier::NONE, hold)
    }

    /// Presses every token at once: modifiers are merged, the last key token
    /// wins.  Held for the combo hold time, then released with no trailing gap.
    ///
    /// Unknown tokens are logged and dropped; if none of the tokens resolve,
    /// nothing is written and [`EncoderError::UnknownKey`] names the first one.
    pub fn combo<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<ComboOutcome, EncoderError> {
        let mut modifier = Modifier::NONE;
        let mut key = None;
        let mut unknown = Vec::new();
        let mut resolved_any = false;

        for token in tokens {
            let token = token.as_ref().to_lowercase();
            if let Some(m) = KeyMapper::resolve_modifier(&token) {
                modifier |= m;
                resolved_any = true;
            } else if let Some(k) = KeyMapper::resolve(&token) {
                key = Some(k);
                resolved_any = true;
            } else {
                warn!(token = %token, "unknown key in combo; skipping");
                unknown.push(token);
            }
        }

        if !resolved_any {
            let first = unknown.into_iter().next().unwrap_or_default();
            return Err(EncoderError::UnknownKey(first));
        }

        let hold = self.timing.combo_hold;
        self.stroke(Keystroke { modifier, key }, hold, Duration::ZERO)?;
        Ok(ComboOutcome {
            modifier,
            key,
            unknown,
        })
    }

    /// Types `text` with the configured per-character hold.
    pub fn type_text(&mut self, text: &str) -> Result<TypeOutcome, EncoderError> {
        let per_char = self.timing.char_delay;
        self.type_text_with_delay(text, per_char)
    }

    /// Types `text` one character at a time, holding each for `per_char`.
    ///
    /// `'\n'` presses enter and `'\r'` is dropped.  Characters without a key
    /// are logged, collected in [`TypeOutcome::skipped`], and typing goes on.
    pub fn type_text_with_delay(
        &mut self,
        text: &str,
        per_char: Duration,
    ) -> Result<TypeOutcome, EncoderError> {
        let mut outcome = TypeOutcome::default();
        let gap = self.timing.key_gap;

        for ch in text.chars() {
            if ch == '\r' {
                continue;
            }
            match KeyMapper::resolve_char(ch) {
                Some((key, modifier)) => {
                    let stroke = Keystroke {
                        modifier,
                        key: Some(key),
                    };
                    self.stroke(stroke, per_char, gap)?;
                    outcome.typed += 1;
                }
                None => {
                    warn!(character = ?ch, "no key for character; skipping");
                    outcome.skipped.push(ch);
                }
            }
        }
        Ok(outcome)
    }

    fn stroke(
        &mut self,
        stroke: Keystroke,
        hold: Duration,
        gap: Duration,
    ) -> Result<(), EncoderError> {
        self.check_running()?;
        self.send(&HidReport::press(stroke.modifier, stroke.key))?;
        self.clock.sleep(hold);
        self.send(&HidReport::RELEASE)?;
        if !gap.is_zero() {
            self.clock.sleep(gap);
        }
        Ok(())
    }
}

fn resolve_name(name: &str) -> Result<(Modifier, Option<HidKeyCode>), EncoderError> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return KeyMapper::resolve_char(ch)
            .map(|(key, modifier)| (modifier, Some(key)))
            .ok_or_else(|| EncoderError::UnknownKey(name.to_string()));
    }

    let lower = name.to_lowercase();
    if let Some(key) = KeyMapper::resolve(&lower) {
        return Ok((Modifier::NONE, Some(key)));
    }
    if let Some(modifier) = KeyMapper::resolve_modifier(&lower) {
        return Ok((modifier, None));
    }
    Err(KeymapError::UnknownKey(name.to_string()).into())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::device::MockHidDevice;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Clock that only records.
    #[derive(Clone, Default)]
    struct TestClock(Rc<RefCell<Vec<Duration>>>);

    impl Clock for TestClock {
        fn sleep(&self, duration: Duration) {
            self.0.borrow_mut().push(duration);
        }
    }

    /// Device that records every report.
    #[derive(Clone, Default)]
    struct TestDevice(Rc<RefCell<Vec<HidReport>>>);

    impl HidDevice for TestDevice {
        fn write_report(&mut self, report: &HidReport) -> Result<(), DeviceError> {
            self.0.borrow_mut().push(*report);
            Ok(())
        }
    }

    fn make_encoder() -> (ReportEncoder<TestDevice, TestClock>, TestDevice, TestClock) {
        let device = TestDevice::default();
        let clock = TestClock::default();
        let encoder = ReportEncoder::new(device.clone(), clock.clone());
        (encoder, device, clock)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_tap_writes_press_then_release_with_default_timing() {
        // Arrange
        let (mut encoder, device, clock) = make_encoder();

        // Act
        let stroke = encoder.tap("enter").unwrap();

        // Assert
        assert_eq!(stroke.key, Some(HidKeyCode::Enter));
        let reports = device.0.borrow();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].keycode(), 0x28);
        assert!(reports[1].is_release());
        assert_eq!(*clock.0.borrow(), vec![ms(50), ms(10)]);
    }

    #[test]
    fn test_press_key_single_uppercase_char_adds_shift() {
        let (mut encoder, device, _) = make_encoder();

        encoder.press_key("A", Modifier::NONE, ms(5)).unwrap();

        let reports = device.0.borrow();
        assert_eq!(reports[0].as_bytes(), &[0x02, 0, 0x04, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_press_key_long_name_is_case_insensitive_and_merges_extra_modifier() {
        let (mut encoder, device, _) = make_encoder();

        encoder.press_key("DELETE", Modifier::CTRL, ms(5)).unwrap();

        let reports = device.0.borrow();
        assert_eq!(reports[0].modifier(), Modifier::CTRL);
        assert_eq!(reports[0].keycode(), 0x4C);
    }

    #[test]
    fn test_press_key_modifier_name_sends_modifier_only_report() {
        let (mut encoder, device, _) = make_encoder();

        encoder.tap("gui").unwrap();

        let reports = device.0.borrow();
        assert_eq!(reports[0].as_bytes(), &[0x08, 0, 0, 0, 0, 0, 0, 0]);
        assert!(reports[1].is_release());
    }

    #[test]
    fn test_unknown_key_writes_nothing() {
        let (mut encoder, device, clock) = make_encoder();

        let err = encoder.tap("notakey").unwrap_err();

        assert!(matches!(err, EncoderError::UnknownKey(ref n) if n == "notakey"));
        assert!(err.is_recoverable());
        assert!(device.0.borrow().is_empty());
        assert!(clock.0.borrow().is_empty());
    }

    #[test]
    fn test_combo_merges_modifiers_and_holds() {
        // Arrange
        let (mut encoder, device, clock) = make_encoder();

        // Act
        let outcome = encoder.combo(&["ctrl", "alt", "delete"]).unwrap();

        // Assert
        assert_eq!(outcome.modifier.bits(), 0x05);
        assert_eq!(outcome.key, Some(HidKeyCode::Delete));
        assert!(outcome.unknown.is_empty());
        let reports = device.0.borrow();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].as_bytes(), &[0x05, 0, 0x4C, 0, 0, 0, 0, 0]);
        assert!(reports[1].is_release());
        assert_eq!(*clock.0.borrow(), vec![ms(100)]);
    }

    #[test]
    fn test_combo_last_key_wins() {
        let (mut encoder, device, _) = make_encoder();

        let outcome = encoder.combo(&["a", "b"]).unwrap();

        assert_eq!(outcome.key, Some(HidKeyCode::KeyB));
        assert_eq!(device.0.borrow()[0].keycode(), 0x05);
    }

    #[test]
    fn test_combo_skips_unknown_tokens_and_sends_the_rest() {
        let (mut encoder, device, _) = make_encoder();

        let outcome = encoder.combo(&["ctrl", "bogus", "c"]).unwrap();

        assert_eq!(outcome.unknown, vec!["bogus".to_string()]);
        assert_eq!(device.0.borrow()[0].as_bytes(), &[0x01, 0, 0x06, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_combo_with_no_known_tokens_is_unknown_key() {
        let (mut encoder, device, _) = make_encoder();

        let err = encoder.combo(&["foo", "bar"]).unwrap_err();

        assert!(matches!(err, EncoderError::UnknownKey(ref n) if n == "foo"));
        assert!(device.0.borrow().is_empty());
    }

    #[test]
    fn test_type_text_pairs_every_character() {
        // Arrange
        let (mut encoder, device, _) = make_encoder();

        // Act
        let outcome = encoder.type_text("Ab").unwrap();

        // Assert
        assert_eq!(outcome.typed, 2);
        let reports = device.0.borrow();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].as_bytes(), &[0x02, 0, 0x04, 0, 0, 0, 0, 0]);
        assert!(reports[1].is_release());
        assert_eq!(reports[2].as_bytes(), &[0x00, 0, 0x05, 0, 0, 0, 0, 0]);
        assert!(reports[3].is_release());
    }

    #[test]
    fn test_type_text_newline_is_enter_and_carriage_return_dropped() {
        let (mut encoder, device, _) = make_encoder();

        let outcome = encoder.type_text("a\r\n").unwrap();

        assert_eq!(outcome.typed, 2);
        let reports = device.0.borrow();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[2].keycode(), HidKeyCode::Enter.as_u8());
    }

    #[test]
    fn test_type_text_skips_untypeable_characters() {
        let (mut encoder, device, _) = make_encoder();

        let outcome = encoder.type_text("aéb").unwrap();

        assert_eq!(outcome.typed, 2);
        assert_eq!(outcome.skipped, vec!['é']);
        assert_eq!(device.0.borrow().len(), 4);
    }

    #[test]
    fn test_type_text_with_delay_uses_given_hold() {
        let (mut encoder, _, clock) = make_encoder();

        encoder.type_text_with_delay("x", ms(7)).unwrap();

        assert_eq!(*clock.0.borrow(), vec![ms(7), ms(10)]);
    }

    #[test]
    fn test_empty_text_writes_nothing() {
        let (mut encoder, device, _) = make_encoder();

        let outcome = encoder.type_text("").unwrap();

        assert_eq!(outcome, TypeOutcome::default());
        assert!(device.0.borrow().is_empty());
    }

    #[test]
    fn test_release_all_writes_one_zero_report() {
        let (mut encoder, device, _) = make_encoder();

        encoder.release_all().unwrap();

        assert_eq!(*device.0.borrow(), vec![HidReport::RELEASE]);
    }

    #[test]
    fn test_custom_timing_is_used() {
        let (encoder, _, clock) = make_encoder();
        let timing = TimingConfig {
            key_press: ms(1),
            key_gap: ms(2),
            combo_hold: ms(3),
            char_delay: ms(4),
        };
        let mut encoder = encoder.with_timing(timing);

        encoder.tap("a").unwrap();
        encoder.combo(&["ctrl", "a"]).unwrap();

        assert_eq!(*clock.0.borrow(), vec![ms(1), ms(2), ms(3)]);
    }

    #[test]
    fn test_cleared_running_flag_interrupts_before_press() {
        // Arrange
        let running = Arc::new(AtomicBool::new(true));
        let (encoder, device, _) = make_encoder();
        let mut encoder = encoder.with_running_flag(Arc::clone(&running));
        encoder.tap("a").unwrap();

        // Act
        running.store(false, Ordering::SeqCst);
        let err = encoder.type_text("bc").unwrap_err();

        // Assert
        assert!(matches!(err, EncoderError::Interrupted));
        assert!(!err.is_recoverable());
        assert_eq!(device.0.borrow().len(), 2);
    }

    #[test]
    fn test_device_failure_propagates_without_retry() {
        // Arrange
        let mut device = MockHidDevice::new();
        device
            .expect_write_report()
            .times(1)
            .returning(|_| Err(DeviceError::Io(std::io::Error::other("gadget gone"))));
        let mut encoder = ReportEncoder::new(device, TestClock::default());

        // Act
        let err = encoder.tap("a").unwrap_err();

        // Assert
        assert!(matches!(err, EncoderError::Device(DeviceError::Io(_))));
    }
}
