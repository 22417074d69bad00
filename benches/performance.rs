//! Performance benchmarks for the endpoint pinger
//!
//! Covers the CPU-bound stages: endpoint extraction, ping summary parsing,
//! deduplication and result ordering. Probing itself is dominated by the
//! network and is not measured here.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use clap::Parser;
use wg_endpoint_pinger::{
    cli::Cli,
    config::parser::ConfigParser,
    executor::dedup_endpoints,
    extractor::endpoint_hosts,
    models::{Endpoint, PingStats, ProbeFailure, ProbeResult},
    output::{OutputFormatter, OutputFormatterFactory},
    probe::parse_ping_output,
    report::sort_results,
};
use std::time::Duration;

/// Build a config text with the given number of peers
fn create_sample_config(peers: usize) -> String {
    let mut content = String::from("[Interface]\nPrivateKey = aGVsbG8=\nAddress = 10.66.0.2/32\nDNS = 1.1.1.1\n\n");
    for i in 0..peers {
        content.push_str("[Peer]\nPublicKey = d29ybGQ=\nAllowedIPs = 0.0.0.0/0, ::/0\n");
        if i % 3 == 0 {
            content.push_str(&format!("Endpoint = [2001:db8::{:x}]:51820\n\n", i));
        } else {
            content.push_str(&format!("Endpoint = node-{}.vpn.example.net:51820 # region {}\n\n", i, i % 7));
        }
    }
    content
}

/// Create sample endpoints, every fourth one a duplicate
fn create_sample_endpoints(count: usize) -> Vec<Endpoint> {
    (0..count)
        .map(|i| {
            let host = format!("10.{}.{}.1", (i / 4) / 256, (i / 4) % 256);
            let host = if i % 4 == 3 { format!("10.0.0.{}", i % 200) } else { host };
            Endpoint::new(host, format!("/etc/wireguard/wg{}.conf", i))
        })
        .collect()
}

/// Create sample results with a mix of latencies and failures
fn create_sample_results(count: usize) -> Vec<ProbeResult> {
    (0..count)
        .map(|i| {
            let endpoint = Endpoint::new(format!("host-{}", i), format!("wg{}.conf", i));
            let outcome = if i % 5 == 0 {
                Err(ProbeFailure::TotalLoss)
            } else {
                let avg_ms = ((i * 7919) % 500) as f64 + 0.25;
                Ok(PingStats {
                    transmitted: 3,
                    received: 3,
                    loss_percent: 0.0,
                    min_ms: avg_ms - 0.2,
                    avg_ms,
                    max_ms: avg_ms + 0.4,
                })
            };
            ProbeResult::from_outcome(&endpoint, outcome, Duration::from_millis(2000))
        })
        .collect()
}

const LINUX_PING_OUTPUT: &str = "PING 10.0.0.1 (10.0.0.1) 56(84) bytes of data.
64 bytes from 10.0.0.1: icmp_seq=1 ttl=64 time=0.041 ms
64 bytes from 10.0.0.1: icmp_seq=2 ttl=64 time=0.052 ms
64 bytes from 10.0.0.1: icmp_seq=3 ttl=64 time=0.047 ms

--- 10.0.0.1 ping statistics ---
3 packets transmitted, 3 received, 0% packet loss, time 2041ms
rtt min/avg/max/mdev = 0.041/0.046/0.052/0.004 ms
";

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for peers in [1, 50, 1000] {
        let content = create_sample_config(peers);
        group.bench_with_input(BenchmarkId::new("endpoint_hosts", peers), &content, |b, content| {
            b.iter(|| endpoint_hosts(black_box(content)).filter(Result::is_ok).count())
        });
    }

    group.finish();
}

fn bench_ping_parsing(c: &mut Criterion) {
    c.bench_function("parse_ping_output", |b| {
        b.iter(|| parse_ping_output(black_box(LINUX_PING_OUTPUT)))
    });
}

fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");

    for count in [100, 10_000] {
        let endpoints = create_sample_endpoints(count);
        group.bench_with_input(BenchmarkId::new("dedup_endpoints", count), &endpoints, |b, endpoints| {
            b.iter(|| dedup_endpoints(black_box(endpoints.clone())))
        });
    }

    group.finish();
}

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");

    for count in [100, 10_000] {
        let results = create_sample_results(count);
        group.bench_with_input(BenchmarkId::new("sort_results", count), &results, |b, results| {
            b.iter(|| {
                let mut results = results.clone();
                sort_results(black_box(&mut results));
                results
            })
        });
    }

    group.finish();
}

fn bench_output_formatting(c: &mut Criterion) {
    let results = create_sample_results(200);
    let formatter = OutputFormatterFactory::create_plain_formatter();

    c.bench_function("format_results_table_200", |b| {
        b.iter(|| formatter.format_results_table(black_box(&results)))
    });
}

fn bench_config_parsing(c: &mut Criterion) {
    c.bench_function("config_parsing", |b| {
        b.iter(|| {
            let cli = Cli::parse_from(["wgping", "/etc/wireguard", "-c", "5", "-P", "32", "-t", "10"]);
            ConfigParser::new(black_box(cli)).without_env_file().parse()
        })
    });
}

criterion_group!(
    benches,
    bench_extraction,
    bench_ping_parsing,
    bench_dedup,
    bench_sorting,
    bench_output_formatting,
    bench_config_parsing
);
criterion_main!(benches);
