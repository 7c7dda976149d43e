//! GreyNoise Community Integration Module
//!
//! Query the GreyNoise community API for an address classification.
//!
//! A 404 carrying a community body means "never observed" and maps to
//! `Unknown`. Every other non-success answer is a `LookupError`.

use std::net::IpAddr;

use chrono::NaiveDate;

use super::types::{
    ClassificationReport, ClassificationSource, GreyNoiseApiResponse, LookupError, Service,
};
use crate::logic::policy::Classification;

// ============================================================================
// GREYNOISE CLIENT
// ============================================================================

pub struct GreyNoiseClient {
    agent: ureq::Agent,
    api_url: String,
    api_key: Option<String>,
}

impl GreyNoiseClient {
    pub fn new(agent: ureq::Agent, api_url: &str, api_key: Option<&str>) -> Self {
        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_string),
        }
    }

    fn lookup_url(&self, address: IpAddr) -> String {
        format!("{}/{}", self.api_url, address)
    }

    /// Query community API for an IP address (blocking)
    pub fn check_ip(&self, address: IpAddr) -> Result<ClassificationReport, LookupError> {
        let url = self.lookup_url(address);
        log::debug!("GreyNoise lookup: {}", url);

        let mut request = self.agent.get(&url);
        if let Some(key) = &self.api_key {
            request = request.set("key", key);
        } else {
            log::debug!("No GreyNoise API key configured, querying anonymously");
        }

        match request.call() {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string()
                    .map_err(|e| LookupError::Network {
                        service: Service::GreyNoise,
                        address,
                        message: e.to_string(),
                    })?;

                if status != 200 {
                    return Err(LookupError::Status {
                        service: Service::GreyNoise,
                        address,
                        status,
                        body,
                    });
                }

                parse_api_response(&body, address)
            }
            Err(ureq::Error::Status(404, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                parse_not_observed(&body, address).ok_or(LookupError::Status {
                    service: Service::GreyNoise,
                    address,
                    status: 404,
                    body,
                })
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(LookupError::Status {
                    service: Service::GreyNoise,
                    address,
                    status,
                    body,
                })
            }
            Err(e) => Err(LookupError::Network {
                service: Service::GreyNoise,
                address,
                message: e.to_string(),
            }),
        }
    }
}

impl ClassificationSource for GreyNoiseClient {
    fn fetch_classification(&self, address: IpAddr) -> Result<ClassificationReport, LookupError> {
        self.check_ip(address)
    }
}

// ============================================================================
// PARSE RESPONSE
// ============================================================================

fn parse_api_response(body: &str, address: IpAddr) -> Result<ClassificationReport, LookupError> {
    let resp: GreyNoiseApiResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Malformed {
            service: Service::GreyNoise,
            address,
            message: e.to_string(),
        })?;

    if !names_address(&resp, address) {
        return Err(LookupError::Malformed {
            service: Service::GreyNoise,
            address,
            message: format!("response does not name the queried address (ip: {:?})", resp.ip),
        });
    }

    let classification = match resp.classification.as_deref() {
        None => Classification::Unknown,
        Some(label) => Classification::from_label(label).unwrap_or_else(|| {
            log::warn!("Unrecognized GreyNoise classification '{}' for {}, treating as unknown", label, address);
            Classification::Unknown
        }),
    };

    Ok(ClassificationReport {
        classification,
        observed: resp.noise || resp.riot || resp.classification.is_some(),
        name: resp.name.filter(|n| !n.is_empty() && n != "unknown"),
        last_seen: resp.last_seen
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
    })
}

/// A 404 body naming the queried address means "not observed"
fn parse_not_observed(body: &str, address: IpAddr) -> Option<ClassificationReport> {
    let resp: GreyNoiseApiResponse = serde_json::from_str(body).ok()?;
    if !names_address(&resp, address) {
        return None;
    }

    if let Some(message) = &resp.message {
        log::info!("GreyNoise: {}", message);
    }

    Some(ClassificationReport::not_observed())
}

fn names_address(resp: &GreyNoiseApiResponse, address: IpAddr) -> bool {
    resp.ip.as_deref().and_then(|ip| ip.trim().parse::<IpAddr>().ok()) == Some(address)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> IpAddr {
        "45.83.66.1".parse().unwrap()
    }

    #[test]
    fn test_parse_malicious() {
        let body = r#"{
            "ip": "45.83.66.1",
            "noise": true,
            "riot": false,
            "classification": "malicious",
            "name": "unknown",
            "link": "https://viz.greynoise.io/ip/45.83.66.1",
            "last_seen": "2024-03-01",
            "message": "Success"
        }"#;

        let report = parse_api_response(body, addr()).unwrap();
        assert_eq!(report.classification, Classification::Malicious);
        assert!(report.observed);
        assert!(report.name.is_none());
        assert_eq!(report.last_seen, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_parse_benign_riot() {
        let body = r#"{"ip":"8.8.8.8","noise":false,"riot":true,"classification":"benign","name":"Google Public DNS","last_seen":"2024-03-02"}"#;

        let report = parse_api_response(body, "8.8.8.8".parse().unwrap()).unwrap();
        assert_eq!(report.classification, Classification::Benign);
        assert_eq!(report.name.as_deref(), Some("Google Public DNS"));
    }

    #[test]
    fn test_unrecognized_label_is_unknown() {
        let body = r#"{"ip":"45.83.66.1","noise":true,"classification":"suspicious"}"#;

        let report = parse_api_response(body, addr()).unwrap();
        assert_eq!(report.classification, Classification::Unknown);
        assert!(report.observed);
    }

    #[test]
    fn test_bad_last_seen_is_ignored() {
        let body = r#"{"ip":"45.83.66.1","classification":"benign","last_seen":"yesterday"}"#;

        let report = parse_api_response(body, addr()).unwrap();
        assert!(report.last_seen.is_none());
    }

    #[test]
    fn test_malformed_body_is_error() {
        let err = parse_api_response("<html>bad gateway</html>", addr()).unwrap_err();
        assert!(matches!(err, LookupError::Malformed { service: Service::GreyNoise, .. }));
    }

    #[test]
    fn test_not_observed_body() {
        let body = r#"{"ip":"45.83.66.1","noise":false,"riot":false,"message":"IP not observed scanning the internet or contained in RIOT data set."}"#;

        let report = parse_not_observed(body, addr()).unwrap();
        assert_eq!(report.classification, Classification::Unknown);
        assert!(!report.observed);
    }

    #[test]
    fn test_404_without_ip_is_not_a_classification() {
        assert!(parse_not_observed(r#"{"message":"route not found"}"#, addr()).is_none());
        assert!(parse_not_observed("Not Found", addr()).is_none());
    }

    #[test]
    fn test_404_naming_other_address_is_not_a_classification() {
        let body = r#"{"ip":"9.9.9.9","noise":false,"riot":false,"message":"IP not observed"}"#;
        assert!(parse_not_observed(body, addr()).is_none());
    }

    #[test]
    fn test_200_without_ip_is_malformed() {
        for body in ["{}", r#"{"classification":"benign"}"#] {
            let err = parse_api_response(body, addr()).unwrap_err();
            assert!(matches!(err, LookupError::Malformed { service: Service::GreyNoise, .. }), "accepted {}", body);
        }
    }

    #[test]
    fn test_200_for_other_address_is_malformed() {
        let body = r#"{"ip":"9.9.9.9","noise":true,"classification":"malicious"}"#;
        let err = parse_api_response(body, addr()).unwrap_err();
        assert!(matches!(err, LookupError::Malformed { .. }));
    }

    #[test]
    fn test_ipv6_address_matches_any_spelling() {
        let address: IpAddr = "2001:db8::1".parse().unwrap();
        let body = r#"{"ip":"2001:0db8:0000:0000:0000:0000:0000:0001","classification":"benign"}"#;
        let report = parse_api_response(body, address).unwrap();
        assert_eq!(report.classification, Classification::Benign);
    }
}
