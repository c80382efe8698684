//! [`DeviceSigningAdapter`] owns the connection to a signing device and
//! forwards signing requests to it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, info, warn};

use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::events::{AdapterEvent, EventSink};
use crate::readiness::ReadinessDetector;
use crate::session::{DeviceSession, SessionProvider, SessionTransaction};
use crate::types::{PublicKey, ReadyState};

/// Result of a connect attempt that every concurrent caller awaits.
type PendingConnect<S> = Shared<BoxFuture<'static, Result<Established<S>, AdapterError>>>;

struct Established<S> {
    public_key: PublicKey,
    session: Arc<S>,
}

impl<S> Clone for Established<S> {
    fn clone(&self) -> Self {
        Self {
            public_key: self.public_key,
            session: Arc::clone(&self.session),
        }
    }
}

struct InFlight<S> {
    attempt: u64,
    pending: PendingConnect<S>,
    waiters: usize,
}

struct State<S> {
    public_key: Option<PublicKey>,
    session: Option<Arc<S>>,
    attempts: u64,
    in_flight: Option<InFlight<S>>,
    /// Attempt cancelled by `disconnect` whose outcome nobody has reported yet.
    superseded: Option<u64>,
}

/// Wallet adapter for a hardware signing device.
///
/// Lifecycle: `Disconnected` -> `Connecting` -> `Connected` -> `Disconnected`,
/// repeatable. The public key is set iff a session is held, and signing
/// without a session fails before the device is touched.
pub struct DeviceSigningAdapter<P: SessionProvider> {
    config: AdapterConfig,
    ready_state: ReadyState,
    provider: Arc<P>,
    events: Box<dyn EventSink>,
    state: Mutex<State<P::Session>>,
}

impl<P: SessionProvider> DeviceSigningAdapter<P> {
    /// `readiness` is probed once here; the result never changes afterwards.
    pub fn new(
        config: AdapterConfig,
        readiness: &impl ReadinessDetector,
        provider: P,
        events: impl EventSink + 'static,
    ) -> Self {
        let ready_state = readiness.detect();
        debug!("{} adapter ready state: {ready_state}", config.name);
        Self {
            config,
            ready_state,
            provider: Arc::new(provider),
            events: Box::new(events),
            state: Mutex::new(State {
                public_key: None,
                session: None,
                attempts: 0,
                in_flight: None,
                superseded: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn public_key(&self) -> Option<PublicKey> {
        self.state().public_key
    }

    pub fn connecting(&self) -> bool {
        self.state().in_flight.is_some()
    }

    pub fn connected(&self) -> bool {
        self.state().public_key.is_some()
    }

    /// Open a device session and read the account's public key.
    ///
    /// Returns immediately when already connected. A call made while another
    /// connect is in flight waits for that attempt and shares its outcome.
    pub async fn connect(&self) -> Result<(), AdapterError> {
        let (attempt, pending) = {
            let mut state = self.state();
            if state.public_key.is_some() {
                return Ok(());
            }

            let joined = state.in_flight.as_mut().map(|in_flight| {
                in_flight.waiters += 1;
                (in_flight.attempt, in_flight.pending.clone())
            });

            if let Some((attempt, pending)) = joined {
                debug!("joining connect attempt #{attempt}");
                (attempt, pending)
            } else if self.ready_state == ReadyState::Unsupported {
                drop(state);
                return Err(self.fail(AdapterError::NotReady));
            } else {
                state.attempts += 1;
                let attempt = state.attempts;
                let pending = establish(Arc::clone(&self.provider)).boxed().shared();
                state.in_flight = Some(InFlight {
                    attempt,
                    pending: pending.clone(),
                    waiters: 1,
                });
                debug!("starting connect attempt #{attempt}");
                (attempt, pending)
            }
        };

        let mut waiter = Waiter {
            adapter: self,
            attempt,
            settled: false,
        };
        let outcome = pending.await;
        waiter.settled = true;
        self.settle(attempt, outcome)
    }

    /// Tear down the session and forget the public key. Never fails.
    ///
    /// A connect still in flight is superseded: its callers get
    /// [`AdapterError::Connection`] and the session it opens is dropped.
    pub async fn disconnect(&self) {
        let (session, torn_down) = {
            let mut state = self.state();
            let cancelled = match state.in_flight.take() {
                Some(in_flight) => {
                    state.superseded = Some(in_flight.attempt);
                    true
                }
                None => false,
            };
            let had_key = state.public_key.take().is_some();
            (state.session.take(), had_key || cancelled)
        };

        if let Some(session) = session {
            if let Err(e) = session.close().await {
                warn!("failed to close device session: {e}");
            }
        }

        if torn_down {
            info!("{} disconnected", self.config.name);
            self.events.emit(AdapterEvent::Disconnect);
        }
    }

    pub async fn sign_transaction(
        &self,
        transaction: SessionTransaction<P>,
    ) -> Result<SessionTransaction<P>, AdapterError> {
        let session = self.session().map_err(|e| self.fail(e))?;
        session
            .sign_transaction(transaction)
            .await
            .map_err(|e| self.fail(AdapterError::sign_transaction(e)))
    }

    /// Sign a batch in one device call, empty batches included. Any failure
    /// fails the whole batch.
    pub async fn sign_all_transactions(
        &self,
        transactions: Vec<SessionTransaction<P>>,
    ) -> Result<Vec<SessionTransaction<P>>, AdapterError> {
        let session = self.session().map_err(|e| self.fail(e))?;
        let expected = transactions.len();
        let signed = session
            .sign_all_transactions(transactions)
            .await
            .map_err(|e| self.fail(AdapterError::sign_transaction(e)))?;

        if signed.len() != expected {
            return Err(self.fail(AdapterError::sign_transaction(format!(
                "device returned {} signed transactions for {expected} inputs",
                signed.len()
            ))));
        }
        Ok(signed)
    }

    /// The first caller to see an attempt's outcome applies it and emits the
    /// events; everyone else sharing the attempt just returns it.
    fn settle(
        &self,
        attempt: u64,
        outcome: Result<Established<P::Session>, AdapterError>,
    ) -> Result<(), AdapterError> {
        let mut state = self.state();
        let owner = matches!(&state.in_flight, Some(f) if f.attempt == attempt);

        if owner {
            state.in_flight = None;
            return match outcome {
                Ok(established) => {
                    let public_key = established.public_key;
                    state.public_key = Some(public_key);
                    state.session = Some(established.session);
                    drop(state);
                    info!("{} connected: {public_key}", self.config.name);
                    self.events.emit(AdapterEvent::Connect(public_key));
                    Ok(())
                }
                Err(err) => {
                    drop(state);
                    Err(self.fail(err))
                }
            };
        }

        if let Ok(established) = &outcome {
            let applied = state
                .session
                .as_ref()
                .is_some_and(|s| Arc::ptr_eq(s, &established.session));
            if applied {
                return Ok(());
            }
        }

        // first to report a superseded attempt emits its error
        let report = state.superseded == Some(attempt);
        if report {
            state.superseded = None;
        }
        drop(state);

        let err = match outcome {
            Err(err) => err,
            Ok(_) => AdapterError::Connection(format!(
                "connect attempt #{attempt} was superseded by disconnect"
            )),
        };
        if report {
            Err(self.fail(err))
        } else {
            Err(err)
        }
    }

    fn session(&self) -> Result<Arc<P::Session>, AdapterError> {
        self.state()
            .session
            .clone()
            .ok_or(AdapterError::NotConnected)
    }

    /// Report an error to listeners, then hand it back for the caller.
    fn fail(&self, err: AdapterError) -> AdapterError {
        warn!("{} adapter error: {err}", self.config.name);
        self.events.emit(AdapterEvent::Error(err.clone()));
        err
    }

    fn state(&self) -> MutexGuard<'_, State<P::Session>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn establish<P: SessionProvider>(
    provider: Arc<P>,
) -> Result<Established<P::Session>, AdapterError> {
    let session = provider
        .open_session()
        .await
        .map_err(AdapterError::load)?;

    let account = session
        .get_account()
        .await
        .map_err(AdapterError::public_key)?;
    let public_key = account
        .parse::<PublicKey>()
        .map_err(AdapterError::public_key)?;

    Ok(Established {
        public_key,
        session: Arc::new(session),
    })
}

/// Tracks one caller waiting on a connect attempt. When the last waiter goes
/// away before the attempt settles, the attempt is abandoned so `connecting`
/// does not stay set.
struct Waiter<'a, P: SessionProvider> {
    adapter: &'a DeviceSigningAdapter<P>,
    attempt: u64,
    settled: bool,
}

impl<P: SessionProvider> Drop for Waiter<'_, P> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.adapter.state();
        let abandoned = match state.in_flight.as_mut() {
            Some(in_flight) if in_flight.attempt == self.attempt => {
                in_flight.waiters -= 1;
                in_flight.waiters == 0
            }
            _ => false,
        };
        if abandoned {
            state.in_flight = None;
            warn!("connect attempt #{} abandoned", self.attempt);
        }
    }
}
