//! `[serve]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, IpAddr};

/// Development server settings. `folio serve -i/-p` override the first two.
///
/// ```toml
/// [serve]
/// interface = "0.0.0.0"
/// port = 3000
/// port_retries = 5    # try 3000..=3004 before giving up
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeSection {
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// How many consecutive ports to try when `port` is taken.
    #[serde(default = "defaults::serve::port_retries")]
    #[educe(Default = defaults::serve::port_retries())]
    pub port_retries: u16,
}

impl ServeSection {
    pub fn ip(&self) -> Result<IpAddr, AddrParseError> {
        self.interface.trim().parse()
    }
}
