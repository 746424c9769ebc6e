//! Optional cloudflared tunnel in front of the HTTP port.

use log::{info, warn};
use std::process::{Child, Command, Stdio};
use std::thread;

/// Launcher for the optional public tunnel in front of the HTTP port.
///
/// Failure to start is logged and ignored; the service keeps running locally.
pub struct TunnelLauncher {
    program: String,
    port: u16,
}

impl TunnelLauncher {
    pub fn new(port: u16) -> Self {
        Self::with_program("cloudflared", port)
    }

    pub fn with_program(program: &str, port: u16) -> Self {
        Self {
            program: program.to_string(),
            port,
        }
    }

    /// Arguments passed to the tunnel binary.
    pub fn args(&self) -> Vec<String> {
        vec![
            "tunnel".to_string(),
            "--url".to_string(),
            format!("http://localhost:{}", self.port),
        ]
    }

    /// Spawn the tunnel process. Returns `None` when it could not be started.
    pub fn spawn(&self) -> Option<Child> {
        info!("Starting tunnel: {} {}", self.program, self.args().join(" "));
        match Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                info!("Tunnel process started (pid {})", child.id());
                Some(child)
            }
            Err(e) => {
                warn!("Failed to start tunnel {}: {}", self.program, e);
                None
            }
        }
    }

    /// Spawn the tunnel from a background thread and reap it when it exits.
    pub fn start(self) {
        thread::spawn(move || {
            if let Some(mut child) = self.spawn() {
                match child.wait() {
                    Ok(status) => warn!("Tunnel process exited: {}", status),
                    Err(e) => warn!("Failed to wait on tunnel process: {}", e),
                }
            }
        });
    }
}
