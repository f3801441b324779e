use std::thread;
use std::time::Duration;

use election::{ElectionError, LeaderTask};

/// Leader task that only logs and holds the leadership for a fixed time. No cluster actions.
#[derive(Clone, Debug, Default)]
pub struct LoggingLeaderTask {
    name: String,
    duration: Duration,
    rounds_led: u64,
}

impl LoggingLeaderTask {
    pub fn new(name: String, duration: Duration) -> LoggingLeaderTask {
        LoggingLeaderTask {
            name,
            duration,
            rounds_led: 0,
        }
    }
}

impl LeaderTask for LoggingLeaderTask {
    fn lead(&mut self) -> Result<(), ElectionError> {
        self.rounds_led += 1;
        info!("{} leads (round {} as leader)", self.name, self.rounds_led);

        thread::sleep(self.duration);
        Ok(())
    }
}
