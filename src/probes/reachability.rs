//! Site reachability probe.

use std::time::Duration;

use reqwest::blocking::Client;

/// GET each site in order; a non-success status or any request error marks it
/// failed. Returned names have the scheme stripped for display.
pub fn check(sites: &[String], timeout: Duration) -> Vec<String> {
    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        // No client means nothing is reachable this cycle.
        Err(_) => return sites.iter().map(|s| strip_scheme(s)).collect(),
    };

    let mut failed = Vec::new();
    for site in sites {
        let ok = client
            .get(site)
            .send()
            .map(|resp| resp.status().is_success() || resp.status().is_redirection())
            .unwrap_or(false);

        if !ok {
            failed.push(strip_scheme(site));
        }
    }

    failed
}

fn strip_scheme(url: &str) -> String {
    url.trim_start_matches("https://")
        .trim_start_matches("http://")
        .to_string()
}
