/// Whether the (simulated) dial-up link is up. Starts disconnected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkStatus {
    connected: bool,
}

impl NetworkStatus {
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            tracing::info!(connected, "network status changed");
        }
        self.connected = connected;
    }

    /// Flips the link and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_connected(!self.connected);
        self.connected
    }

    pub fn describe(&self) -> &'static str {
        if self.connected {
            "Connected to Internet"
        } else {
            "Not connected"
        }
    }
}
