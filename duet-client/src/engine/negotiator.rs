use crate::config::{ClientConfig, Role, SessionConfig};
use crate::engine::{NegotiationSession, SessionEvent, SessionEventReceiver, SessionStatus};
use crate::error::ClientError;
use crate::link::{LinkEvent, MediaBackend};
use crate::signaling::{RelayClient, SignalSink};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

const COMMAND_BUFFER: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Renegotiate,
    Close,
}

/// Control surface for a running [`Negotiator`].
#[derive(Clone)]
pub struct NegotiatorHandle {
    commands: mpsc::Sender<Command>,
    status: watch::Receiver<SessionStatus>,
}

impl NegotiatorHandle {
    /// Starts as initiator. Only meaningful for a session still in `IDLE`.
    pub async fn start(&self) -> Result<(), ClientError> {
        self.send(Command::Start).await
    }

    pub async fn renegotiate(&self) -> Result<(), ClientError> {
        self.send(Command::Renegotiate).await
    }

    pub async fn close(&self) -> Result<(), ClientError> {
        self.send(Command::Close).await
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Resolves once the published status satisfies `predicate`.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&SessionStatus) -> bool,
    ) -> Result<SessionStatus, ClientError> {
        let status = self
            .status
            .wait_for(predicate)
            .await
            .map_err(|_| ClientError::SessionEnded)?;
        Ok(*status)
    }

    async fn send(&self, command: Command) -> Result<(), ClientError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ClientError::SessionEnded)
    }
}

/// Drives one [`NegotiationSession`] from relay frames, link events and handle commands.
///
/// Everything reaches the session through a single loop, which is what serializes access to its
/// pending candidate queue.
pub struct Negotiator<B: MediaBackend> {
    session: NegotiationSession<B>,
    inbound: mpsc::Receiver<String>,
    link_events: mpsc::UnboundedReceiver<LinkEvent<B::RemoteMedia>>,
    commands: mpsc::Receiver<Command>,
    status: watch::Sender<SessionStatus>,
}

impl<B: MediaBackend> Negotiator<B> {
    pub fn new(
        config: SessionConfig,
        backend: B,
        signals: Arc<dyn SignalSink>,
        inbound: mpsc::Receiver<String>,
    ) -> (
        Self,
        NegotiatorHandle,
        SessionEventReceiver<B::LocalMedia, B::RemoteMedia>,
    ) {
        let (link_tx, link_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (status_tx, status_rx) = watch::channel(SessionStatus::default());

        let session =
            NegotiationSession::new(config, Arc::new(backend), signals, link_tx, events_tx);

        let negotiator = Self {
            session,
            inbound,
            link_events: link_rx,
            commands: commands_rx,
            status: status_tx,
        };
        let handle = NegotiatorHandle {
            commands: commands_tx,
            status: status_rx,
        };

        (negotiator, handle, events_rx)
    }

    /// Opens the relay connection described by `config` and wires a negotiator to it.
    pub async fn connect(
        config: &ClientConfig,
        backend: B,
    ) -> Result<
        (
            Self,
            NegotiatorHandle,
            SessionEventReceiver<B::LocalMedia, B::RemoteMedia>,
        ),
        ClientError,
    > {
        let (relay, inbound) = RelayClient::connect(&config.relay_url).await?;
        Ok(Self::new(
            config.session.clone(),
            backend,
            Arc::new(relay),
            inbound,
        ))
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Announces the room and processes messages until the relay closes or the handle asks to
    /// close. Only a failed initial start in the `Initiator` role ends the run with an error.
    pub async fn run(mut self) -> Result<(), ClientError> {
        self.session.announce().await?;

        if self.session.config().role == Role::Initiator {
            if let Err(e) = self.session.start_as_initiator().await {
                self.session.close().await;
                self.publish();
                return Err(e);
            }
        }
        self.publish();

        loop {
            tokio::select! {
                frame = self.inbound.recv() => match frame {
                    Some(text) => {
                        let result = self.session.handle_signal(&text).await;
                        self.report(result);
                    }
                    None => {
                        info!("Relay connection closed");
                        break;
                    }
                },
                Some(event) = self.link_events.recv() => {
                    let result = self.session.handle_link_event(event).await;
                    self.report(result);
                }
                Some(command) = self.commands.recv() => match command {
                    Command::Start => {
                        let result = self.session.start_as_initiator().await;
                        self.report(result);
                    }
                    Command::Renegotiate => {
                        let result = self.session.renegotiate().await;
                        self.report(result);
                    }
                    Command::Close => break,
                },
            }
            self.publish();
        }

        self.session.close().await;
        self.publish();
        Ok(())
    }

    fn report(&self, result: Result<(), ClientError>) {
        if let Err(e) = result {
            warn!("Negotiation step failed: {}", e);
            self.session.emit(SessionEvent::Error(e));
        }
    }

    fn publish(&self) {
        self.status.send_replace(self.session.status());
    }
}
