use std::time::Duration;

use bridge_proto::command::Surface;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::controller::BridgeEvent;

/// Recurring-timer registration tied 1:1 to a stream session's engine
/// instance.  Each observer carries a generation token; the controller
/// compares it against the session's live observer before acting on a tick,
/// so callbacks queued by a replaced or cancelled observer are discarded
/// instead of touching the new stream.
pub struct ProgressObserver {
    surface: Surface,
    generation: u64,
    task: tokio::task::JoinHandle<()>,
}

impl ProgressObserver {
    pub fn spawn(
        surface: Surface,
        generation: u64,
        period: Duration,
        tx: mpsc::Sender<BridgeEvent>,
    ) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; the reset event
            // emitted by `load` already covers t=0.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx
                    .send(BridgeEvent::Tick {
                        surface,
                        generation,
                    })
                    .await
                    .is_err()
                {
                    debug!("observer: controller gone, stopping");
                    break;
                }
            }
        });
        Self {
            surface,
            generation,
            task,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn cancel(self) {
        // Drop aborts the interval task.
    }
}

impl Drop for ProgressObserver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tick_cadence() {
        let (tx, mut rx) = mpsc::channel(16);
        let observer =
            ProgressObserver::spawn(Surface::Podcast, 7, Duration::from_millis(500), tx);

        tokio::time::sleep(Duration::from_millis(1250)).await;

        let mut ticks = 0;
        while let Ok(ev) = rx.try_recv() {
            match ev {
                BridgeEvent::Tick {
                    surface,
                    generation,
                } => {
                    assert_eq!(surface, Surface::Podcast);
                    assert_eq!(generation, 7);
                    ticks += 1;
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(ticks, 2);
        observer.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let observer =
            ProgressObserver::spawn(Surface::Video, 1, Duration::from_secs(1), tx);
        observer.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
