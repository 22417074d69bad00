//! Peer endpoint model

use crate::types::IpFamily;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A peer endpoint host together with the config file that declared it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Hostname, IPv4 literal or IPv6 literal without brackets or port
    pub host: String,
    /// Config file the host was first seen in
    pub source_path: PathBuf,
}

impl Endpoint {
    pub fn new<H: Into<String>, P: Into<PathBuf>>(host: H, source_path: P) -> Self {
        Self {
            host: host.into(),
            source_path: source_path.into(),
        }
    }

    /// Transport family to probe this endpoint over
    pub fn family(&self) -> IpFamily {
        IpFamily::for_host(&self.host)
    }

    /// File name of the source config, falling back to the full path
    pub fn source_name(&self) -> String {
        source_display_name(&self.source_path)
    }
}

/// Short display name for a config path (`wg0.conf` rather than `/etc/wireguard/wg0.conf`)
pub fn source_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
