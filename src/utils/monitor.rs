#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct CycleStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub elapsed_time: Duration,
}

/// 監控單次 generate 週期的資源使用
#[cfg(feature = "cli")]
pub struct CycleMonitor {
    system: Option<System>,
    pid: Pid,
    start_time: Instant,
}

#[cfg(feature = "cli")]
impl CycleMonitor {
    pub fn new(enabled: bool) -> Self {
        let system = enabled.then(|| System::new_with_specifics(RefreshKind::everything()));
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");

        Self {
            system,
            pid,
            start_time: Instant::now(),
        }
    }

    pub fn stats(&mut self) -> Option<CycleStats> {
        let system = self.system.as_mut()?;
        system.refresh_all();

        let process = system.process(self.pid)?;
        Some(CycleStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: process.memory() / 1024 / 1024,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&mut self) {
        if let Some(stats) = self.stats() {
            tracing::info!(
                "📊 cycle stats: cpu {:.1}%, memory {} MB, elapsed {:.2}s",
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.elapsed_time.as_secs_f64()
            );
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let mut monitor = CycleMonitor::new(false);
        assert!(monitor.stats().is_none());
    }

    #[test]
    fn test_enabled_monitor_reports_stats() {
        let mut monitor = CycleMonitor::new(true);
        let stats = monitor.stats();
        // 進程一定存在，但 CPU 取樣可能為 0
        assert!(stats.is_some());
    }
}
