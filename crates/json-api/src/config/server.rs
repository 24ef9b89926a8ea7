//! Server Config

use clap::Args;

/// HTTP listener settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address the coupon API listens on
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the coupon API listens on
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8698_u16)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, as accepted by the TCP listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
