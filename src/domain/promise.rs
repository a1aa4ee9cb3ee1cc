use crate::domain::model::User;
use crate::utils::error::{BridgeError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Settling side of an async call. Consumed by `resolve` or `reject`.
#[derive(Debug)]
pub struct UsersPromise {
    tx: oneshot::Sender<Result<Vec<User>>>,
}

impl UsersPromise {
    pub fn resolve(self, users: Vec<User>) {
        if self.tx.send(Ok(users)).is_err() {
            tracing::debug!("Resolved a promise nobody is waiting on");
        }
    }

    pub fn reject(self, error: BridgeError) {
        if self.tx.send(Err(error)).is_err() {
            tracing::debug!("Rejected a promise nobody is waiting on");
        }
    }

    /// True once the caller has dropped its `PendingUsers`.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Caller side of an async call.
///
/// Resolves to the module's users, or to its rejection. If the module drops
/// the promise without settling it, this resolves to
/// [`BridgeError::PromiseDropped`] rather than waiting forever.
#[derive(Debug)]
pub struct PendingUsers {
    rx: oneshot::Receiver<Result<Vec<User>>>,
}

impl PendingUsers {
    /// A handle that is already settled with `result`.
    pub fn settled(result: Result<Vec<User>>) -> Self {
        let (promise, pending) = promise();
        match result {
            Ok(users) => promise.resolve(users),
            Err(e) => promise.reject(e),
        }
        pending
    }

    /// Takes the outcome if the call has settled, without waiting.
    pub fn try_settle(&mut self) -> Option<Result<Vec<User>>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(BridgeError::PromiseDropped)),
        }
    }
}

impl Future for PendingUsers {
    type Output = Result<Vec<User>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(BridgeError::PromiseDropped)),
            Poll::Pending => Poll::Pending,
        }
    }
}

pub fn promise() -> (UsersPromise, PendingUsers) {
    let (tx, rx) = oneshot::channel();
    (UsersPromise { tx }, PendingUsers { rx })
}
