//! Probing through the operating system's `ping` binary

use crate::{
    models::ProbeFailure,
    probe::{parse_ping_output, ProbeOutcome, Prober},
    types::IpFamily,
};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::{process::Command, time::timeout};

/// Command-line dialect of the local `ping`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingPlatform {
    /// iputils or busybox: `-c`, `-W`, `-w`, `-4`/`-6`
    Linux,
    /// macOS and the BSDs: `-t` deadline, `ping6` for IPv6
    Bsd,
    /// Windows: `-n` count, `-w` per-reply wait in milliseconds
    Windows,
}

impl PingPlatform {
    /// Platform the binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )) {
            Self::Bsd
        } else {
            Self::Linux
        }
    }
}

/// Invocation of the system ping: program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingInvocation {
    pub program: String,
    pub args: Vec<String>,
}

/// [`Prober`] backed by the system `ping` utility
#[derive(Debug, Clone)]
pub struct SystemPinger {
    platform: PingPlatform,
}

impl SystemPinger {
    pub fn new() -> Self {
        Self::for_platform(PingPlatform::current())
    }

    pub fn for_platform(platform: PingPlatform) -> Self {
        Self { platform }
    }

    /// Build the command line for one probe
    pub fn invocation(&self, host: &str, count: u32, timeout: Duration, family: IpFamily) -> PingInvocation {
        let deadline_secs = ping_deadline_secs(timeout);
        let family_flag = match family {
            IpFamily::V4 => "-4",
            IpFamily::V6 => "-6",
        };

        match self.platform {
            PingPlatform::Linux => PingInvocation {
                program: "ping".to_string(),
                args: vec![
                    "-n".to_string(),
                    "-c".to_string(),
                    count.to_string(),
                    "-W".to_string(),
                    deadline_secs.to_string(),
                    "-w".to_string(),
                    deadline_secs.to_string(),
                    family_flag.to_string(),
                    host.to_string(),
                ],
            },
            PingPlatform::Bsd => match family {
                IpFamily::V4 => PingInvocation {
                    program: "ping".to_string(),
                    args: vec![
                        "-n".to_string(),
                        "-c".to_string(),
                        count.to_string(),
                        "-t".to_string(),
                        deadline_secs.to_string(),
                        host.to_string(),
                    ],
                },
                // ping6 has no overall deadline flag; the scheduler's timeout covers it
                IpFamily::V6 => PingInvocation {
                    program: "ping6".to_string(),
                    args: vec![
                        "-n".to_string(),
                        "-c".to_string(),
                        count.to_string(),
                        host.to_string(),
                    ],
                },
            },
            PingPlatform::Windows => {
                // -w bounds each reply, so a lossy train costs up to count waits
                let reply_wait_ms = (deadline_secs * 1000 / u64::from(count.max(1))).max(1);
                PingInvocation {
                    program: "ping".to_string(),
                    args: vec![
                        "-n".to_string(),
                        count.to_string(),
                        "-w".to_string(),
                        reply_wait_ms.to_string(),
                        family_flag.to_string(),
                        host.to_string(),
                    ],
                }
            }
        }
    }
}

/// Deadline handed to `ping`, in whole seconds.
///
/// One second below the hard bound (when the bound allows it), so a lossy
/// run still prints its summary before the probe is cut off.
pub fn ping_deadline_secs(timeout: Duration) -> u64 {
    let secs = timeout.as_secs();
    if secs >= 2 {
        secs - PING_DEADLINE_MARGIN_SECS
    } else {
        1
    }
}

const PING_DEADLINE_MARGIN_SECS: u64 = 1;

impl Default for SystemPinger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prober for SystemPinger {
    async fn probe(&self, host: &str, count: u32, deadline: Duration, family: IpFamily) -> ProbeOutcome {
        let invocation = self.invocation(host, count, deadline, family);

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(deadline, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(ProbeFailure::Spawn(format!("{}: {}", invocation.program, e))),
            Err(_) => return Err(ProbeFailure::Timeout(deadline)),
        };

        // ping exits non-zero on any loss; the summary decides reachability
        parse_ping_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn name(&self) -> &str {
        "system-ping"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(invocation: &PingInvocation) -> Vec<&str> {
        invocation.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_linux_invocation() {
        let pinger = SystemPinger::for_platform(PingPlatform::Linux);

        let v4 = pinger.invocation("10.0.0.1", 3, Duration::from_secs(5), IpFamily::V4);
        assert_eq!(v4.program, "ping");
        assert_eq!(args(&v4), vec!["-n", "-c", "3", "-W", "4", "-w", "4", "-4", "10.0.0.1"]);

        let v6 = pinger.invocation("2001:db8::1", 4, Duration::from_secs(2), IpFamily::V6);
        assert_eq!(args(&v6), vec!["-n", "-c", "4", "-W", "1", "-w", "1", "-6", "2001:db8::1"]);
    }

    #[test]
    fn test_ping_deadline_stays_inside_timeout() {
        assert_eq!(ping_deadline_secs(Duration::from_millis(300)), 1);
        assert_eq!(ping_deadline_secs(Duration::from_secs(1)), 1);
        assert_eq!(ping_deadline_secs(Duration::from_secs(2)), 1);
        assert_eq!(ping_deadline_secs(Duration::from_millis(2500)), 1);
        assert_eq!(ping_deadline_secs(Duration::from_secs(5)), 4);
        assert_eq!(ping_deadline_secs(Duration::from_secs(300)), 299);
    }

    #[test]
    fn test_bsd_invocation_uses_ping6() {
        let pinger = SystemPinger::for_platform(PingPlatform::Bsd);

        let v4 = pinger.invocation("vpn.example.com", 3, Duration::from_secs(4), IpFamily::V4);
        assert_eq!(args(&v4), vec!["-n", "-c", "3", "-t", "3", "vpn.example.com"]);

        let v6 = pinger.invocation("fd00::1", 3, Duration::from_secs(4), IpFamily::V6);
        assert_eq!(v6.program, "ping6");
    }

    #[test]
    fn test_windows_invocation() {
        let pinger = SystemPinger::for_platform(PingPlatform::Windows);
        let invocation = pinger.invocation("10.0.0.1", 2, Duration::from_secs(3), IpFamily::V4);
        assert_eq!(args(&invocation), vec!["-n", "2", "-w", "1000", "-4", "10.0.0.1"]);
    }

    /// Stand-in for iputils ping: runs until its `-w` deadline even when
    /// replies are missing, then prints a partial-loss summary
    #[cfg(unix)]
    const LOSSY_PING_SCRIPT: &str = r#"#!/bin/sh
deadline=1
while [ $# -gt 0 ]; do
  case "$1" in
    -w) deadline="$2"; shift ;;
  esac
  shift
done
sleep "$deadline"
echo "--- 10.0.0.1 ping statistics ---"
echo "3 packets transmitted, 2 received, 33.3333% packet loss, time 2003ms"
echo "rtt min/avg/max/mdev = 10.000/11.000/12.000/0.816 ms"
"#;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_partial_loss_finishes_inside_timeout() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Instant;

        let bin_dir = tempfile::TempDir::new().unwrap();
        let script = bin_dir.path().join("ping");
        std::fs::write(&script, LOSSY_PING_SCRIPT).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let original_path = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![bin_dir.path().to_path_buf()];
        paths.extend(std::env::split_paths(&original_path));
        std::env::set_var("PATH", std::env::join_paths(paths).unwrap());

        let pinger = SystemPinger::for_platform(PingPlatform::Linux);
        let started = Instant::now();
        let outcome = pinger.probe("10.0.0.1", 3, Duration::from_secs(2), IpFamily::V4).await;
        let elapsed = started.elapsed();

        std::env::set_var("PATH", original_path);

        let stats = outcome.unwrap();
        assert_eq!(stats.transmitted, 3);
        assert_eq!(stats.received, 2);
        assert_eq!(stats.avg_ms, 11.0);
        assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
    }

    #[test]
    fn test_current_platform_matches_target() {
        let platform = PingPlatform::current();
        #[cfg(target_os = "linux")]
        assert_eq!(platform, PingPlatform::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(platform, PingPlatform::Bsd);
        let _ = platform;
    }
}
