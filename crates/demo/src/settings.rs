//! Demo settings from command-line flags and environment variables.

use anyhow::{bail, Context};

/// Environment variable scaling every TTL and pause in the timeline
pub const TIME_SCALE_VAR: &str = "LAPSE_DEMO_TIME_SCALE";

/// Environment variable selecting `json` log output
pub const LOG_FORMAT_VAR: &str = "LAPSE_LOG_FORMAT";

/// How the demo should run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSettings {
    /// Drive a mock clock instead of sleeping
    pub mock_clock: bool,
    /// Multiplier applied to TTLs and pauses (1.0 = unscaled timings)
    pub time_scale: f64,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self { mock_clock: false, time_scale: 1.0, json_logs: false }
    }
}

impl DemoSettings {
    /// Build settings from arguments (without the program name) and a
    /// variable lookup.
    pub fn parse<I, F>(args: I, var: F) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        for arg in args {
            match arg.as_str() {
                "--mock" => settings.mock_clock = true,
                other => bail!("unknown argument `{other}` (supported: --mock)"),
            }
        }

        if let Some(raw) = var(TIME_SCALE_VAR) {
            let scale: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{TIME_SCALE_VAR}=`{raw}` is not a number"))?;
            if !scale.is_finite() || scale <= 0.0 {
                bail!("{TIME_SCALE_VAR} must be a positive number, got {scale}");
            }
            settings.time_scale = scale;
        }

        settings.json_logs = var(LOG_FORMAT_VAR).is_some_and(|format| format == "json");

        Ok(settings)
    }

    /// Scale a duration in milliseconds, keeping at least 1ms for positive
    /// inputs.
    pub fn scale_millis(&self, millis: u64) -> u64 {
        if millis == 0 {
            return 0;
        }
        ((millis as f64) * self.time_scale).round().max(1.0) as u64
    }
}
