use std::sync::mpsc::{self, Receiver, Sender};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SignalError {
    #[error("{dropped} subscriber(s) disconnected")]
    Disconnected { dropped: usize },
    #[error("receive failed")]
    RecvFailed,
}

/// Fan-out change notification. Every emitted value is cloned to each live
/// subscriber; subscribers whose receiving end is gone are pruned on emit.
#[derive(Debug)]
pub struct Signal<T> {
    subscribers: Vec<Sender<T>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<T: Clone + Send + 'static> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription<T> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        Subscription { receiver }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn emit(&mut self, value: T) -> Result<(), SignalError> {
        let before = self.subscribers.len();
        self.subscribers
            .retain(|sender| sender.send(value.clone()).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            log::debug!("signal pruned {dropped} disconnected subscriber(s)");
            return Err(SignalError::Disconnected { dropped });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Subscription<T> {
    receiver: Receiver<T>,
}

impl<T> Subscription<T> {
    pub fn try_recv(&self) -> Result<Option<T>, SignalError> {
        match self.receiver.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(SignalError::RecvFailed),
        }
    }

    /// Collects everything queued so far without blocking.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}
