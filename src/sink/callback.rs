//! Side-effect sink backed by a closure.

use std::fmt;
use std::sync::Arc;

use super::LogSink;
use crate::record::LogRecord;

/// Hands every record to a closure.
///
/// The closure runs under the container lock. It must not log into a
/// handler that writes to the same container.
#[derive(Clone)]
pub struct CallbackSink {
    callback: Arc<dyn Fn(&LogRecord) + Send + Sync>,
}

impl CallbackSink {
    pub fn new(callback: impl Fn(&LogRecord) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }
}

impl LogSink for CallbackSink {
    fn write(&mut self, record: LogRecord) {
        (self.callback)(&record);
    }
}

impl fmt::Debug for CallbackSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::container::Container;
    use crate::facade::LogHandler;
    use crate::handler::ContainerLogHandler;
    use crate::record::Level;

    #[test]
    fn test_callback_runs_once_per_record_before_log_returns() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            CallbackSink::new(move |record| seen.lock().unwrap().push(record.message().to_string()))
        };
        let handler = ContainerLogHandler::new("hooks", Container::new(sink)).with_level(Level::Notice);

        handler.log(Level::Notice, "first".into(), None, crate::location!());
        assert_eq!(*seen.lock().unwrap(), vec!["first"]);

        handler.log(Level::Info, "filtered".into(), None, crate::location!());
        handler.log(Level::Error, "second".into(), None, crate::location!());
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_clones_share_the_callback() {
        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut sink = {
            let count = Arc::clone(&count);
            CallbackSink::new(move |_| {
                count.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            })
        };
        let mut copy = sink.clone();
        let record = || {
            crate::LogRecord::new(
                Level::Debug,
                "x".into(),
                "hooks",
                None,
                crate::Metadata::new(),
                crate::location!(),
            )
        };

        sink.write(record());
        copy.write(record());
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 2);
    }
}
