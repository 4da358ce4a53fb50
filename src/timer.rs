//! Per-question countdown running as a cancellable background task.
//!
//! Every event carries the generation it was started for so the receiver
//! can drop events that were already queued when the timer was replaced.

use crossbeam_channel::{after, bounded, select, tick, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub const TICK: Duration = Duration::from_secs(1);
pub const EXPIRY_GRACE: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { generation: u64, remaining: u32 },
    Expired { generation: u64 },
    Advance { generation: u64 },
}

impl TimerEvent {
    pub fn generation(&self) -> u64 {
        match self {
            TimerEvent::Tick { generation, .. }
            | TimerEvent::Expired { generation }
            | TimerEvent::Advance { generation } => *generation,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    pub seconds: u32,
    pub tick: Duration,
    pub grace: Duration,
}

/// Owning handle of a running countdown. Dropping it cancels the task.
#[derive(Debug)]
pub struct TimerHandle {
    _cancel: Sender<()>,
}

impl TimerHandle {
    pub fn cancel(self) {
        drop(self);
    }
}

/// Starts a countdown for `generation`. Returns `None` when the countdown is
/// disabled (zero seconds) or the worker thread could not be spawned.
pub fn start_countdown(
    countdown: Countdown,
    generation: u64,
    events: Sender<TimerEvent>,
) -> Option<TimerHandle> {
    if countdown.seconds == 0 {
        return None;
    }

    let (cancel_tx, cancel_rx) = bounded::<()>(0);

    thread::Builder::new()
        .name("quiz-runner::countdown".to_string())
        .spawn(move || run_countdown(countdown, generation, events, cancel_rx))
        .ok()?;

    Some(TimerHandle { _cancel: cancel_tx })
}

fn run_countdown(
    countdown: Countdown,
    generation: u64,
    events: Sender<TimerEvent>,
    cancel: Receiver<()>,
) {
    let ticker = tick(countdown.tick);
    let mut remaining = countdown.seconds;

    while remaining > 0 {
        select! {
            recv(cancel) -> _ => return,
            recv(ticker) -> _ => {
                remaining -= 1;
                if events.send(TimerEvent::Tick { generation, remaining }).is_err() {
                    return;
                }
            }
        }
    }

    if events.send(TimerEvent::Expired { generation }).is_err() {
        return;
    }

    select! {
        recv(cancel) -> _ => {},
        recv(after(countdown.grace)) -> _ => {
            let _ = events.send(TimerEvent::Advance { generation });
        }
    }
}

pub fn format_time(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) if s > 0 => format!("{:02}:{:02}", s / 60, s % 60),
        _ => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn fast(seconds: u32) -> Countdown {
        Countdown {
            seconds,
            tick: Duration::from_millis(5),
            grace: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(None), "--:--");
        assert_eq!(format_time(Some(0)), "--:--");
        assert_eq!(format_time(Some(5)), "00:05");
        assert_eq!(format_time(Some(195)), "03:15");
    }

    #[test]
    fn test_zero_seconds_is_disabled() {
        let (tx, _rx) = unbounded();
        assert!(start_countdown(fast(0), 1, tx).is_none());
    }

    #[test]
    fn test_countdown_runs_to_advance() {
        let (tx, rx) = unbounded();
        let handle = start_countdown(fast(2), 7, tx).unwrap();

        let timeout = Duration::from_secs(2);
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            TimerEvent::Tick {
                generation: 7,
                remaining: 1
            }
        );
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            TimerEvent::Tick {
                generation: 7,
                remaining: 0
            }
        );
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            TimerEvent::Expired { generation: 7 }
        );
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            TimerEvent::Advance { generation: 7 }
        );
        drop(handle);
    }

    #[test]
    fn test_cancel_stops_events() {
        let (tx, rx) = unbounded();
        let countdown = Countdown {
            seconds: 3,
            tick: Duration::from_millis(200),
            grace: Duration::from_millis(200),
        };
        let handle = start_countdown(countdown, 1, tx).unwrap();
        handle.cancel();

        // The worker owns the only sender; it disconnects once the task exits.
        let mut received = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(2)) {
            received.push(event);
        }
        assert!(received.is_empty());
    }

    #[test]
    fn test_event_generation() {
        assert_eq!(TimerEvent::Expired { generation: 3 }.generation(), 3);
        assert_eq!(
            TimerEvent::Tick {
                generation: 4,
                remaining: 1
            }
            .generation(),
            4
        );
    }
}
