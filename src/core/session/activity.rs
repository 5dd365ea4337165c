use super::SubscriptionId;
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEvent {
    /// Any user interaction.
    Activity,
    /// Explicit "keep me signed in a little longer".
    Extend,
    StaySignedIn(bool),
    Logout,
    /// The source has no more events.
    Closed,
}

impl ActivityEvent {
    /// Map one line typed in the session prompt to an event.
    /// Unknown input still counts as activity.
    pub fn from_line(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "e" | "extend" => ActivityEvent::Extend,
            "stay on" => ActivityEvent::StaySignedIn(true),
            "stay off" => ActivityEvent::StaySignedIn(false),
            "q" | "quit" | "logout" => ActivityEvent::Logout,
            _ => ActivityEvent::Activity,
        }
    }
}

/// Something that produces user activity events.
pub trait ActivitySource {
    fn subscribe(&mut self, sink: Sender<ActivityEvent>) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

type Subscribers = Arc<Mutex<Vec<(SubscriptionId, Sender<ActivityEvent>)>>>;

fn broadcast(subs: &Subscribers, ev: &ActivityEvent) {
    if let Ok(mut list) = subs.lock() {
        // Drop subscribers whose receiver is gone.
        list.retain(|(_, tx)| tx.send(ev.clone()).is_ok());
    }
}

/// Reads lines from a terminal (or any reader) on a background thread.
/// The reader thread is started by the first subscription.
pub struct LineActivity<R: BufRead + Send + 'static> {
    reader: Option<R>,
    subscribers: Subscribers,
    next_id: u64,
}

impl<R: BufRead + Send + 'static> LineActivity<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_id: 1,
        }
    }

    fn spawn_reader(&mut self) {
        let Some(reader) = self.reader.take() else {
            return;
        };
        let subs = Arc::clone(&self.subscribers);

        thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(l) => broadcast(&subs, &ActivityEvent::from_line(&l)),
                    Err(_) => break,
                }
            }
            broadcast(&subs, &ActivityEvent::Closed);
        });
    }
}

impl<R: BufRead + Send + 'static> ActivitySource for LineActivity<R> {
    fn subscribe(&mut self, sink: Sender<ActivityEvent>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        if let Ok(mut list) = self.subscribers.lock() {
            list.push((id, sink));
        }
        self.spawn_reader();
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        if let Ok(mut list) = self.subscribers.lock() {
            list.retain(|(sid, _)| *sid != id);
        }
    }
}

/// Synthetic source: events are pushed by the caller.
/// Events emitted while nobody listens are queued for the first subscriber.
#[derive(Default)]
pub struct ManualActivity {
    subscribers: Vec<(SubscriptionId, Sender<ActivityEvent>)>,
    queued: Vec<ActivityEvent>,
    next_id: u64,
}

impl ManualActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted<I>(events: I) -> Self
    where
        I: IntoIterator<Item = ActivityEvent>,
    {
        Self {
            queued: events.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn emit(&mut self, ev: ActivityEvent) {
        if self.subscribers.is_empty() {
            self.queued.push(ev);
            return;
        }
        self.subscribers.retain(|(_, tx)| tx.send(ev.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl ActivitySource for ManualActivity {
    fn subscribe(&mut self, sink: Sender<ActivityEvent>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        for ev in self.queued.drain(..) {
            let _ = sink.send(ev);
        }
        self.subscribers.push((id, sink));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn lines_map_to_events() {
        assert_eq!(ActivityEvent::from_line(""), ActivityEvent::Activity);
        assert_eq!(ActivityEvent::from_line(" Extend "), ActivityEvent::Extend);
        assert_eq!(
            ActivityEvent::from_line("stay on"),
            ActivityEvent::StaySignedIn(true)
        );
        assert_eq!(ActivityEvent::from_line("q"), ActivityEvent::Logout);
        assert_eq!(ActivityEvent::from_line("list"), ActivityEvent::Activity);
    }

    #[test]
    fn line_source_delivers_then_closes() {
        let mut src = LineActivity::new(Cursor::new("\nextend\n"));
        let (tx, rx) = mpsc::channel();
        src.subscribe(tx);

        let got: Vec<ActivityEvent> = (0..3)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        assert_eq!(
            got,
            vec![
                ActivityEvent::Activity,
                ActivityEvent::Extend,
                ActivityEvent::Closed
            ]
        );
    }

    #[test]
    fn manual_source_stops_after_unsubscribe() {
        let mut src = ManualActivity::new();
        let (tx, rx) = mpsc::channel();
        let id = src.subscribe(tx);

        src.emit(ActivityEvent::Activity);
        src.unsubscribe(id);
        src.emit(ActivityEvent::Extend);

        assert_eq!(rx.try_recv(), Ok(ActivityEvent::Activity));
        assert!(rx.try_recv().is_err());
        assert_eq!(src.subscriber_count(), 0);
    }

    #[test]
    fn scripted_events_reach_the_first_subscriber() {
        let mut src = ManualActivity::scripted([ActivityEvent::Extend]);
        src.emit(ActivityEvent::Logout);

        let (tx, rx) = mpsc::channel();
        src.subscribe(tx);

        assert_eq!(rx.try_recv(), Ok(ActivityEvent::Extend));
        assert_eq!(rx.try_recv(), Ok(ActivityEvent::Logout));
    }
}
