//! Observable container for sink values.
//!
//! # Data Flow
//! ```text
//! write(value) / update(|v| ..) / FieldRef::set
//!     → lock
//!     → mutate value
//!     → enqueue a clone (or mapped view) to every live subscriber, in
//!       registration order
//!     → unlock
//! ```
//!
//! # Design Decisions
//! - One mutex guards the value and the subscriber list, so a subscription
//!   sees exactly the writes that happen after it registered
//! - Delivery is enqueue-and-return on unbounded channels; writers never
//!   wait on a subscriber
//! - Values are only cloned when someone is subscribed; `subscribe_map`
//!   subscribers get a projection instead of the whole value
//! - Field handles modify through `update`, so they never clobber other writers
//! - Poisoned locks are recovered; no container operation fails

pub mod field;
pub mod subscription;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

pub use field::FieldRef;
pub use subscription::Subscription;

/// One subscriber's channel plus what it wants to see of each value.
trait Notify<S>: Send {
    /// Deliver `value`; `false` once the subscriber is gone.
    fn notify(&self, value: &S) -> bool;

    fn is_closed(&self) -> bool;
}

struct Mapped<T, F> {
    tx: mpsc::UnboundedSender<T>,
    map: F,
}

impl<S, T, F> Notify<S> for Mapped<T, F>
where
    T: Send,
    F: Fn(&S) -> T + Send,
{
    fn notify(&self, value: &S) -> bool {
        self.tx.send((self.map)(value)).is_ok()
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

struct State<S> {
    value: S,
    subscribers: Vec<Box<dyn Notify<S>>>,
}

impl<S> State<S> {
    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let value = &self.value;
        self.subscribers.retain(|subscriber| subscriber.notify(value));
    }
}

/// Shared, observable owner of one value.
///
/// Clones share the same value; it is dropped with the last clone, which
/// also ends every subscription stream.
pub struct Container<S> {
    state: Arc<Mutex<State<S>>>,
}

impl<S> Clone for Container<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> Container<S>
where
    S: Clone + Send + 'static,
{
    pub fn new(value: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                value,
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current value.
    pub fn read(&self) -> S {
        self.lock().value.clone()
    }

    /// Borrow the current value under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock().value)
    }

    /// Replace the value and notify subscribers.
    pub fn write(&self, value: S) {
        self.update(|current| *current = value);
    }

    /// Mutate the value in place and notify subscribers, atomically with
    /// respect to every other write.
    ///
    /// `f` runs with the lock held and must not touch this container.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut state = self.lock();
        let out = f(&mut state.value);
        state.notify();
        out
    }

    /// Stream of every value written from now on.
    pub fn subscribe(&self) -> Subscription<S> {
        self.subscribe_map(S::clone)
    }

    /// Stream of `map(value)` for every value written from now on.
    ///
    /// `map` runs under the container lock, once per write.
    pub fn subscribe_map<T, F>(&self, map: F) -> Subscription<T>
    where
        T: Send + 'static,
        F: Fn(&S) -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(Box::new(Mapped { tx, map }));
        Subscription::new(rx)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.subscribers.retain(|subscriber| !subscriber.is_closed());
        state.subscribers.len()
    }

    /// Read/write handle to the whole value.
    ///
    /// Writes through it, and through handles projected from it, run in one
    /// [`update`](Self::update).
    pub fn reference(&self) -> FieldRef<S> {
        let reader = self.clone();
        let writer = self.clone();
        FieldRef::from_modify(
            move || reader.read(),
            move |f: &mut dyn FnMut(&mut S)| writer.update(|value| f(value)),
        )
    }

    /// Read/write handle to one field of the value.
    ///
    /// Writes go through [`update`](Self::update) and notify subscribers.
    pub fn field<T, G, W>(&self, get: G, set: W) -> FieldRef<T>
    where
        T: 'static,
        G: Fn(&S) -> T + Send + Sync + 'static,
        W: Fn(&mut S, T) + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let get_field = Arc::clone(&get);
        let reader = self.clone();
        let writer = self.clone();
        FieldRef::from_modify(
            move || reader.with(|value| get(value)),
            move |f: &mut dyn FnMut(&mut T)| {
                writer.update(|value| {
                    let mut field = get_field(value);
                    f(&mut field);
                    set(value, field);
                })
            },
        )
    }

    /// True if both handles share one value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl<S> Default for Container<S>
where
    S: Default + Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> fmt::Debug for Container<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Container")
            .field("value", &state.value)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Settings {
        name: String,
        retries: u32,
    }

    #[test]
    fn test_read_write() {
        let container = Container::new(1u32);
        assert_eq!(container.read(), 1);
        container.write(5);
        assert_eq!(container.read(), 5);
        assert_eq!(container.update(|v| { *v += 1; *v }), 6);
        assert_eq!(container.with(|v| *v * 2), 12);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_writes() {
        let container = Container::new(0u32);
        container.write(1);
        let mut sub = container.subscribe();
        container.write(2);

        assert_eq!(sub.try_next(), Some(2));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn test_subscribers_each_get_every_value() {
        let container = Container::new(0u32);
        let mut first = container.subscribe();
        let mut second = container.subscribe();
        for n in 1..=3 {
            container.write(n);
        }
        let drain = |sub: &mut Subscription<u32>| std::iter::from_fn(|| sub.try_next()).collect::<Vec<_>>();
        assert_eq!(drain(&mut first), vec![1, 2, 3]);
        assert_eq!(drain(&mut second), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_is_independent() {
        let container = Container::new(0u32);
        let mut kept = container.subscribe();
        let mut cancelled = container.subscribe();
        assert_eq!(container.subscriber_count(), 2);

        cancelled.cancel();
        container.write(7);
        assert_eq!(container.subscriber_count(), 1);
        assert_eq!(kept.try_next(), Some(7));
        assert_eq!(cancelled.try_next(), None);

        drop(kept);
        container.write(8);
        assert_eq!(container.subscriber_count(), 0);
        assert_eq!(container.read(), 8);
    }

    #[test]
    fn test_field_writes_notify() {
        let container = Container::<Settings>::default();
        let mut sub = container.subscribe();

        let retries = container.field(|s| s.retries, |s, v| s.retries = v);
        retries.set(3);
        assert_eq!(retries.get(), 3);
        assert_eq!(container.read().retries, 3);
        assert_eq!(sub.try_next().map(|s| s.retries), Some(3));
    }

    #[test]
    fn test_reference_projection() {
        let container = Container::<Settings>::default();
        let mut sub = container.subscribe();

        let name = container
            .reference()
            .project(|s: &Settings| s.name.clone(), |s, v| s.name = v);
        name.set("primary".to_string());

        assert_eq!(container.read().name, "primary");
        assert_eq!(sub.try_next().map(|s| s.name), Some("primary".to_string()));
    }

    #[test]
    fn test_mapped_subscription_gets_projection() {
        let container = Container::<Vec<u32>>::default();
        let mut last = container.subscribe_map(|values: &Vec<u32>| values.last().copied());
        container.update(|v| v.push(4));
        container.update(|v| v.push(9));

        assert_eq!(last.try_next(), Some(Some(4)));
        assert_eq!(last.try_next(), Some(Some(9)));
        assert_eq!(container.subscriber_count(), 1);
        drop(last);
        assert_eq!(container.subscriber_count(), 0);
    }

    #[test]
    fn test_projected_writes_do_not_lose_concurrent_updates() {
        const WRITES: u32 = 2_000;
        let container = Container::<Settings>::default();
        let retries = container
            .reference()
            .project(|s: &Settings| s.retries, |s, v| s.retries = v);

        let appender = {
            let container = container.clone();
            std::thread::spawn(move || {
                for _ in 0..WRITES {
                    container.update(|s| s.name.push('x'));
                }
            })
        };
        for n in 0..WRITES {
            retries.set(n);
        }
        appender.join().unwrap();

        let settings = container.read();
        assert_eq!(settings.name.len(), WRITES as usize);
        assert_eq!(settings.retries, WRITES - 1);
    }

    #[tokio::test]
    async fn test_stream_ends_when_container_dropped() {
        let container = Container::new(String::new());
        let sub = container.subscribe();
        container.write("a".into());
        container.write("b".into());
        drop(container);

        let values: Vec<String> = sub.collect().await;
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_slow_subscriber_does_not_block_writer() {
        let container = Container::new(0usize);
        let mut sub = container.subscribe();
        for n in 0..10_000 {
            container.write(n);
        }
        assert_eq!(sub.recv().await, Some(0));
        assert_eq!(container.read(), 9_999);
    }
}
