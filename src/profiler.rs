use std::time::Instant;

/// Logs the duration of consecutive named steps and the total on drop.
pub struct Profiler {
    start_time: Instant,
    current: Option<Step>,
}

struct Step {
    start_time: Instant,
    name: &'static str,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            current: None,
        }
    }

    pub fn step(&mut self, step_name: &'static str) {
        self.finish();
        log::info!("{} - START", step_name);
        self.current = Some(Step {
            start_time: Instant::now(),
            name: step_name,
        });
    }

    pub fn finish(&mut self) {
        if let Some(step) = self.current.take() {
            log::info!(
                "{} - STOP {:.3} s",
                step.name,
                step.start_time.elapsed().as_secs_f64()
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Profiler {
    fn drop(&mut self) {
        self.finish();
        log::info!(
            "TOTAL - {:.3} s",
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::Profiler;

    #[test]
    fn step_replaces_running_step() {
        let mut profiler = Profiler::new();
        assert!(!profiler.is_running());
        profiler.step("first");
        assert!(profiler.is_running());
        profiler.step("second");
        assert!(profiler.is_running());
        profiler.finish();
        assert!(!profiler.is_running());
    }
}
