//! GitHub contribution fetch
//!
//! POSTs one GraphQL query for the user's contribution calendar and
//! flattens the nested weeks/days answer into a plain oldest-first series.
//! Every failure surfaces as an error; the caller decides whether to fall
//! back to generated data. No retries here, the next wake cycle is the
//! retry.

use anyhow::{anyhow, Context, Result};
use embedded_svc::http::client::Client;
use embedded_svc::http::Status;
use embedded_svc::io::{Read, Write};
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
use log::info;
use serde::Deserialize;

use crate::config;

/// Flattened calendar as parsed from the API.
#[derive(Debug, PartialEq, Eq)]
pub struct ContributionData {
    /// One count per day, oldest first
    pub series: Vec<u32>,
    /// Total the API reports for the same period; should equal the series
    /// sum, logged when it does not
    pub reported_total: u32,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
}

#[derive(Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Deserialize)]
struct User {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: ContributionsCollection,
}

#[derive(Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: ContributionCalendar,
}

#[derive(Deserialize)]
struct ContributionCalendar {
    #[serde(rename = "totalContributions")]
    total_contributions: u32,
    weeks: Vec<Week>,
}

#[derive(Deserialize)]
struct Week {
    #[serde(rename = "contributionDays")]
    contribution_days: Vec<ContributionDay>,
}

#[derive(Deserialize)]
struct ContributionDay {
    #[serde(rename = "contributionCount")]
    contribution_count: u32,
}

fn calendar_query(user: &str) -> String {
    format!(
        r#"{{"query":"{{ user(login: \"{}\") {{ contributionsCollection {{ contributionCalendar {{ totalContributions weeks {{ contributionDays {{ contributionCount date }} }} }} }} }} }}"}}"#,
        user
    )
}

/// Flatten a GraphQL response body into a [`ContributionData`].
pub fn parse_contributions(body: &[u8]) -> Result<ContributionData> {
    let response: GraphQlResponse =
        serde_json::from_slice(body).context("malformed GraphQL response")?;
    let calendar = response
        .data
        .and_then(|d| d.user)
        .ok_or_else(|| anyhow!("no user in GraphQL response"))?
        .contributions_collection
        .contribution_calendar;

    let series: Vec<u32> = calendar
        .weeks
        .iter()
        .flat_map(|week| week.contribution_days.iter())
        .map(|day| day.contribution_count)
        .collect();

    Ok(ContributionData {
        series,
        reported_total: calendar.total_contributions,
    })
}

/// Fetch the contribution calendar for the configured user.
///
/// Needs WiFi to be up already. The TLS trust anchors come from the
/// esp-idf certificate bundle.
pub fn fetch_contributions(user: &str, token: &str) -> Result<ContributionData> {
    info!("Fetching contributions for {}", user);

    let connection = EspHttpConnection::new(&Configuration {
        use_global_ca_store: true,
        crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
        ..Default::default()
    })?;
    let mut client = Client::wrap(connection);

    let payload = calendar_query(user);
    let authorization = format!("bearer {}", token);
    let headers = [
        ("authorization", authorization.as_str()),
        ("content-type", "application/json"),
        ("user-agent", "contribgraph"),
    ];

    let mut request = client
        .post(config::GITHUB_API_URL, &headers)
        .context("could not open request")?;
    request
        .write_all(payload.as_bytes())
        .context("could not write query")?;
    request.flush().context("could not flush query")?;

    let mut response = request.submit().context("request failed")?;
    let status = response.status();
    if status != 200 {
        return Err(anyhow!("GitHub API returned status {}", status));
    }

    let mut body = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        let read = response.read(&mut chunk).context("could not read body")?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }

    let data = parse_contributions(&body)?;
    let sum: u32 = data.series.iter().sum();
    if sum != data.reported_total {
        info!(
            "API total {} differs from series sum {}",
            data.reported_total, sum
        );
    }
    info!("Fetched {} days of contribution data", data.series.len());

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_nested_calendar() {
        let body = br#"{
            "data": {
                "user": {
                    "contributionsCollection": {
                        "contributionCalendar": {
                            "totalContributions": 10,
                            "weeks": [
                                {"contributionDays": [
                                    {"contributionCount": 1, "date": "2026-07-26"},
                                    {"contributionCount": 0, "date": "2026-07-27"}
                                ]},
                                {"contributionDays": [
                                    {"contributionCount": 9, "date": "2026-08-02"}
                                ]}
                            ]
                        }
                    }
                }
            }
        }"#;
        let data = parse_contributions(body).unwrap();
        assert_eq!(data.series, vec![1, 0, 9]);
        assert_eq!(data.reported_total, 10);
    }

    #[test]
    fn missing_user_is_an_error() {
        let body = br#"{"data": {"user": null}}"#;
        assert!(parse_contributions(body).is_err());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_contributions(b"not json").is_err());
    }

    #[test]
    fn query_embeds_the_login() {
        let q = calendar_query("octocat");
        assert!(q.contains(r#"login: \"octocat\""#));
    }
}
