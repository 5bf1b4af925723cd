use super::probe::Prober;
use super::result::{ProbeOutcome, ProbeStatus, ResultSet};
use crate::input::address::StunAddress;

/// Probes every server concurrently and returns the outcomes in input order.
pub async fn probe_all(prober: &Prober, servers: &[StunAddress]) -> ResultSet {
    let mut handles = vec![];

    for server in servers {
        let prober = prober.clone();
        let server = server.clone();
        handles.push(tokio::spawn(async move { prober.probe(&server).await }));
    }

    let mut results = Vec::with_capacity(servers.len());
    for (handle, server) in handles.into_iter().zip(servers) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Probe task for {server} did not finish: {e}");
                ProbeOutcome::new(server.clone(), ProbeStatus::Failed)
            }
        };
        results.push(outcome);
    }
    results
}
