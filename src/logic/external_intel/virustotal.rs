//! VirusTotal Integration Module
//!
//! Query the VirusTotal IP address report for community votes.
//!
//! Only `total_votes` feeds the decision; `reputation`, `as_owner`,
//! `country` and `last_analysis_date` are carried for display.

use std::net::IpAddr;

use super::types::{LookupError, Service, VTIpResponse, VoteReport, VoteSource};
use crate::logic::policy::VoteTally;

// ============================================================================
// VT CLIENT
// ============================================================================

pub struct VTClient {
    agent: ureq::Agent,
    api_url: String,
    api_key: String,
}

impl VTClient {
    pub fn new(agent: ureq::Agent, api_url: &str, api_key: &str) -> Self {
        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn lookup_url(&self, address: IpAddr) -> String {
        format!("{}/ip_addresses/{}", self.api_url, address)
    }

    /// Query VT API for an IP address (blocking)
    pub fn check_ip(&self, address: IpAddr) -> Result<VoteReport, LookupError> {
        let url = self.lookup_url(address);
        log::debug!("VirusTotal lookup: {}", url);

        let response = self.agent
            .get(&url)
            .set("x-apikey", &self.api_key)
            .call();

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string()
                    .map_err(|e| LookupError::Network {
                        service: Service::VirusTotal,
                        address,
                        message: e.to_string(),
                    })?;

                if status != 200 {
                    return Err(LookupError::Status {
                        service: Service::VirusTotal,
                        address,
                        status,
                        body,
                    });
                }

                parse_api_response(&body, address)
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(LookupError::Status {
                    service: Service::VirusTotal,
                    address,
                    status,
                    body,
                })
            }
            Err(e) => Err(LookupError::Network {
                service: Service::VirusTotal,
                address,
                message: e.to_string(),
            }),
        }
    }
}

impl VoteSource for VTClient {
    fn fetch_votes(&self, address: IpAddr) -> Result<VoteReport, LookupError> {
        self.check_ip(address)
    }
}

// ============================================================================
// PARSE RESPONSE
// ============================================================================

fn parse_api_response(body: &str, address: IpAddr) -> Result<VoteReport, LookupError> {
    let resp: VTIpResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Malformed {
            service: Service::VirusTotal,
            address,
            message: e.to_string(),
        })?;

    let attrs = resp.data.attributes;

    Ok(VoteReport {
        tally: VoteTally::new(attrs.total_votes.harmless, attrs.total_votes.malicious),
        reputation: attrs.reputation,
        as_owner: attrs.as_owner,
        country: attrs.country,
        last_analysis_date: attrs.last_analysis_date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
