use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn reset(&mut self) {
        self.start = None;
        self.elapsed = Duration::ZERO;
        self.subtimers.clear();
    }

    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[derive(Debug, Default)]
struct SubTimersMap(HashMap<&'static str, InnerTimer>);

impl Deref for SubTimersMap {
    type Target = HashMap<&'static str, InnerTimer>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for SubTimersMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl SubTimersMap {
    fn start_subtimer(&mut self, key: &'static str) {
        let t = self.0.entry(key).or_default();
        t.start();
    }

    fn total_time(&self) -> Duration {
        self.values()
            .fold(Duration::ZERO, |acc, t| acc + t.elapsed())
    }

    fn log(&self, depth: usize) {
        for (key, val) in self.iter() {
            let tabs = format!("{: <1$}", "", 4 * depth);
            tracing::debug!("{}{} : {:?}", tabs, *key, val.elapsed);
            val.subtimers.log(depth + 1);
        }
    }
}

/// Nested phase timers.  Timers started while another is running are
/// recorded as its children.
#[derive(Default, Debug)]
pub(crate) struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let (first, rest) = self.stack.split_first()?;
        let mut active_timer = self.subtimers.get_mut(first)?;
        for key in rest {
            active_timer = active_timer.subtimers.get_mut(key)?;
        }
        Some(active_timer)
    }

    /// clears every timer and the call stack
    pub fn reset(&mut self) {
        self.stack.clear();
        for t in self.subtimers.values_mut() {
            t.reset();
        }
    }

    pub fn start_as_current(&mut self, key: &'static str) {
        if let Some(active) = self.mut_active_timer() {
            active.subtimers.start_subtimer(key);
        } else {
            self.subtimers.start_subtimer(key);
        }
        self.stack.push(key);
    }

    pub fn stop_current(&mut self) {
        if let Some(active) = self.mut_active_timer() {
            active.stop();
        }
        self.stack.pop();
    }

    /// Accumulated time of the timer at `path`, given as the sequence of
    /// keys from the root.  Zero if no such timer has run.
    pub fn elapsed(&self, path: &[&'static str]) -> Duration {
        let Some((first, rest)) = path.split_first() else {
            return self.total_time();
        };
        let mut timer = match self.subtimers.get(first) {
            Some(t) => t,
            None => return Duration::ZERO,
        };
        for key in rest {
            timer = match timer.subtimers.get(key) {
                Some(t) => t,
                None => return Duration::ZERO,
            };
        }
        timer.elapsed()
    }

    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    /// writes the timer tree to the debug log
    pub fn log(&self) {
        self.subtimers.log(0);
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

#[test]
fn test_timers_nesting() {
    let mut timers = Timers::default();

    timeit! {timers => "outer"; {
        timeit!{timers => "inner"; {
            std::thread::sleep(Duration::from_millis(2));
        }}
    }}

    let outer = timers.elapsed(&["outer"]);
    let inner = timers.elapsed(&["outer", "inner"]);
    assert!(inner >= Duration::from_millis(2));
    assert!(outer >= inner);
    assert_eq!(timers.elapsed(&["inner"]), Duration::ZERO);
    assert_eq!(timers.total_time(), outer);

    timers.reset();
    assert_eq!(timers.elapsed(&["outer"]), Duration::ZERO);
}
