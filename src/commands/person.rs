use super::{read_json, to_json};
use crate::config::EngineConfig;
use crate::pipeline::{score_portfolio, Portfolio, PortfolioScore};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

pub fn score_person(
    portfolio_path: &Path,
    reference_time: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<PortfolioScore> {
    let portfolio: Portfolio = read_json(portfolio_path, "portfolio")?;
    Ok(score_portfolio(
        &portfolio.person_id,
        &portfolio.repositories,
        reference_time,
        config,
    ))
}

pub fn render(score: &PortfolioScore) -> Result<String> {
    to_json(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scores_portfolio_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(
            &path,
            r#"{
                "person_id": "alice",
                "repositories": [
                    {
                        "metadata": {
                            "id": "tool", "owner_id": "alice", "stars": 5000, "forks": 800,
                            "watchers": 300, "size_kb": 20000, "license": "MIT",
                            "has_readme": true, "has_tests": true, "has_ci": true,
                            "created_at": "2020-01-01T00:00:00Z",
                            "updated_at": "2024-05-20T00:00:00Z"
                        },
                        "files": [
                            { "path": "main.go", "content": "package main\n\nfunc main() {\n}\n" }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let now = "2024-06-01T00:00:00Z".parse().unwrap();
        let result = score_person(&path, now, &EngineConfig::default()).unwrap();
        assert_eq!(result.person.person_id, "alice");
        assert_eq!(result.analyses.len(), 1);
        assert!(!result.analyses[0].is_pending());
        assert!(render(&result).unwrap().contains("\"status\": \"analyzed\""));
    }

    #[test]
    fn test_malformed_portfolio_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(&path, "{\"repositories\": []}").unwrap();
        let err = score_person(&path, Utc::now(), &EngineConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse portfolio"));
    }
}
