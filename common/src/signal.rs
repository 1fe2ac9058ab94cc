use tokio::signal::unix::{signal, Signal, SignalKind};

/// Listens for the two shutdown signals the server cares about, SIGINT and
/// SIGTERM. Receiving either once asks for a graceful shutdown, receiving
/// another forces it.
pub struct ShutdownSignal {
    interrupt: Signal,
    terminate: Signal,
}

impl ShutdownSignal {
    pub fn listen() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Waits for the next SIGINT or SIGTERM and reports which one arrived.
    /// Cancel safe, a signal that wins the race is consumed.
    pub async fn recv(&mut self) -> SignalKind {
        tokio::select! {
            _ = self.interrupt.recv() => SignalKind::interrupt(),
            _ = self.terminate.recv() => SignalKind::terminate(),
        }
    }
}
