use std::time::{Duration, Instant};
use xr_core::config::DemoConfig;

pub const REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// Paces the periodic inspector report; `None` when the inspector is off.
pub struct ReportTimer {
    last: Option<Instant>,
}

impl ReportTimer {
    pub fn from_config(config: &DemoConfig, now: Instant) -> Self {
        Self {
            last: config.show_inspector.then_some(now),
        }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.last.as_mut() {
            Some(last) if now.duration_since(*last) >= REPORT_INTERVAL => {
                *last = now;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspector_off_never_reports() {
        let config = DemoConfig::from_query("inspector=0");
        let t0 = Instant::now();
        let mut timer = ReportTimer::from_config(&config, t0);
        assert!(!timer.due(t0 + REPORT_INTERVAL));
        assert!(!timer.due(t0 + 10 * REPORT_INTERVAL));
    }

    #[test]
    fn args_joined_like_a_query_enable_reports_every_interval() {
        let args = ["mode=immersive-vr".to_string(), "inspector=1".to_string()];
        let config = DemoConfig::from_query(&args.join("&"));
        let t0 = Instant::now();
        let mut timer = ReportTimer::from_config(&config, t0);
        assert!(!timer.due(t0 + Duration::from_millis(500)));
        assert!(timer.due(t0 + REPORT_INTERVAL));
        assert!(!timer.due(t0 + REPORT_INTERVAL + Duration::from_millis(500)));
        assert!(timer.due(t0 + 2 * REPORT_INTERVAL));
    }
}
