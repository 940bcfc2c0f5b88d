//! Best-effort reverse DNS for resolved hosts.
//!
//! A lookup failure of any kind (timeout, NXDOMAIN, transport error) leaves
//! the hostname empty; it never fails the run. Distinct from a host with no
//! ARP entry, which never reaches this module at all.

use crate::correlate::ResolvedHost;
use crate::error::{CoreError, Result};
use futures::StreamExt;
use futures::stream;
use hickory_resolver::TokioResolver;
use indicatif::{ProgressBar, ProgressStyle};
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

pub struct HostnameResolver {
    resolver: TokioResolver,
    timeout: Duration,
}

impl HostnameResolver {
    /// Build a resolver from the system DNS configuration.
    pub fn from_system_conf(timeout: Duration) -> Result<Self> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| CoreError::Resolver(e.to_string()))?
            .build();

        Ok(Self { resolver, timeout })
    }

    /// Reverse-lookup one address. Returns the first PTR name, or `None` on
    /// any failure once the per-lookup timeout elapses.
    pub async fn lookup(&self, ip: IpAddr) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.resolver.reverse_lookup(ip)).await {
            Ok(Ok(ptr)) => ptr
                .iter()
                .next()
                .map(|name| name.0.to_utf8().trim_end_matches('.').to_string()),
            Ok(Err(e)) => {
                debug!("Reverse lookup for {} failed: {}", ip, e);
                None
            }
            Err(_) => {
                debug!("Reverse lookup for {} timed out", ip);
                None
            }
        }
    }

    /// Fill in hostnames for a batch of resolved hosts.
    ///
    /// Lookups run on a bounded pool of `workers` concurrent queries;
    /// `buffered` yields completions in submission order, so the output
    /// sequence matches the input sequence regardless of lookup latency.
    pub async fn resolve_all(
        &self,
        hosts: Vec<ResolvedHost>,
        workers: usize,
        show_progress: bool,
    ) -> Vec<ResolvedHost> {
        let total = hosts.len();
        if total == 0 {
            return hosts;
        }

        let pb = if show_progress {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] Resolving hostnames {pos}/{len}")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let resolved: Vec<ResolvedHost> = stream::iter(hosts)
            .map(|host| {
                let pb = pb.clone();
                async move {
                    let hostname = self.lookup(host.ip).await;
                    if let Some(ref pb) = pb {
                        pb.inc(1);
                    }
                    ResolvedHost { hostname, ..host }
                }
            })
            .buffered(workers.max(1))
            .collect()
            .await;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        resolved
    }
}
