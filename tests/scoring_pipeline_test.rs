use chrono::{DateTime, TimeZone, Utc};
use indoc::indoc;
use peerscore::config::ParallelConfig;
use peerscore::*;
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn flagship_metadata(id: &str) -> RepositoryMetadata {
    RepositoryMetadata {
        stars: 5000,
        forks: 800,
        watchers: 300,
        size_kb: 20_000,
        license: Some("Apache-2.0".into()),
        has_readme: true,
        ..RepositoryMetadata::new(id, "alice", now())
    }
}

fn significant_metadata(id: &str) -> RepositoryMetadata {
    RepositoryMetadata {
        size_kb: 10_000,
        ..RepositoryMetadata::new(id, "alice", now())
    }
}

fn python_service() -> Vec<SourceFile> {
    vec![
        SourceFile::new(
            "service/orders.py",
            indoc! {r#"
                """Order handling."""


                class OrderBook:
                    """Keeps open orders."""

                    def __init__(self):
                        self.orders = []

                    def add(self, order):
                        if order.quantity <= 0:
                            raise ValueError("empty order")
                        self.orders.append(order)

                    def total(self):
                        return sum(o.quantity for o in self.orders if o.open)
            "#},
        ),
        SourceFile::new(
            "tests/test_orders.py",
            indoc! {r#"
                from service.orders import OrderBook


                def test_total_starts_at_zero():
                    assert OrderBook().total() == 0
            "#},
        ),
        SourceFile::new("requirements.txt", "pytest==8.2\n"),
        SourceFile::new("README.md", "# orders\n"),
    ]
}

#[test]
fn test_repository_score_end_to_end() {
    let meta = flagship_metadata("orders");
    let score = RepositoryScorer::default().score(&meta, &python_service(), now());

    assert_eq!(score.category(), Category::Flagship);
    assert_eq!(score.complexity.function_count, 4);
    assert_eq!(score.complexity.class_count, 1);
    assert_eq!(score.complexity.files_analyzed, 2);
    assert_eq!(score.complexity.heuristic_files, 0);
    assert_eq!(score.overall_repo_score, score.acid.overall);
    for component in [
        score.acid.atomicity,
        score.acid.consistency,
        score.acid.isolation,
        score.acid.durability,
    ] {
        assert!((0.0..=100.0).contains(&component));
    }
}

#[test]
fn test_scoring_is_deterministic() {
    let meta = flagship_metadata("orders");
    let scorer = RepositoryScorer::default();
    let first = scorer.score(&meta, &python_service(), now());
    let second = scorer.score(&meta, &python_service(), now());
    assert_eq!(first, second);
}

#[test]
fn test_broken_file_still_counts() {
    let files = vec![
        SourceFile::new("src/ok.rs", "pub fn fine() -> bool { true }\n"),
        SourceFile::new("src/broken.rs", "pub fn nope( {\n    if x {\n}\n"),
    ];
    let meta = significant_metadata("half-broken");
    let score = RepositoryScorer::default().score(&meta, &files, now());
    assert_eq!(score.complexity.files_analyzed, 2);
    assert_eq!(score.complexity.heuristic_files, 1);
    assert!(score.complexity.function_count >= 2);
}

#[test]
fn test_portfolio_blends_tiers() {
    let inputs = vec![
        RepositoryInput {
            metadata: flagship_metadata("flagship"),
            files: python_service(),
        },
        RepositoryInput {
            metadata: significant_metadata("significant"),
            files: vec![SourceFile::new("main.go", "package main\n\nfunc main() {\n}\n")],
        },
        RepositoryInput {
            metadata: RepositoryMetadata::new(
                "scratch",
                "alice",
                Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap(),
            ),
            files: vec![],
        },
    ];

    let result = score_portfolio("alice", &inputs, now(), &EngineConfig::default());
    assert_eq!(result.analyses.len(), 3);

    let categories: Vec<Category> = result
        .analyses
        .iter()
        .filter_map(RepositoryAnalysis::as_analyzed)
        .map(RepositoryScore::category)
        .collect();
    assert_eq!(
        categories,
        vec![Category::Flagship, Category::Significant, Category::Supporting]
    );

    let person = &result.person;
    assert_eq!(person.flagship_count, 1);
    assert_eq!(person.significant_count, 1);
    assert_eq!(person.weighted_count, 3);
    assert_eq!(person.volume_multiplier, 0.95);

    let scores: Vec<f64> = result
        .analyses
        .iter()
        .filter_map(RepositoryAnalysis::as_analyzed)
        .map(|s| s.overall_repo_score)
        .collect();
    let expected = ((0.6 * scores[0] + 0.4 * scores[1]) * 0.95 * 10.0).round() / 10.0;
    assert!((person.overall_score - expected).abs() < 0.051);
}

#[test]
fn test_portfolio_is_independent_of_parallelism() {
    let inputs: Vec<RepositoryInput> = (0..5)
        .map(|i| RepositoryInput {
            metadata: significant_metadata(&format!("r{i}")),
            files: python_service(),
        })
        .collect();

    let sequential = EngineConfig {
        parallel: ParallelConfig::sequential(),
        ..EngineConfig::default()
    };
    let parallel = EngineConfig {
        parallel: ParallelConfig {
            enabled: true,
            max_concurrency: Some(4),
        },
        ..EngineConfig::default()
    };

    assert_eq!(
        score_portfolio("alice", &inputs, now(), &sequential),
        score_portfolio("alice", &inputs, now(), &parallel)
    );
}

#[test]
fn test_person_scores_feed_cohort_ranking() {
    let people = [("alice", 3usize), ("bob", 1), ("carol", 3)];
    let members: Vec<CohortScore> = people
        .iter()
        .map(|(person, repos)| {
            let inputs: Vec<RepositoryInput> = (0..*repos)
                .map(|i| RepositoryInput {
                    metadata: RepositoryMetadata {
                        owner_id: person.to_string(),
                        ..significant_metadata(&format!("{person}-{i}"))
                    },
                    files: python_service(),
                })
                .collect();
            let result = score_portfolio(person, &inputs, now(), &EngineConfig::default());
            CohortScore::new(*person, result.person.overall_score, "python-2024")
        })
        .collect();

    let entries = rank_cohort_checked("python-2024", &members, now()).unwrap();
    // alice and carol have identical portfolios
    let alice = entries.iter().find(|e| e.person_id == "alice").unwrap();
    let carol = entries.iter().find(|e| e.person_id == "carol").unwrap();
    let bob = entries.iter().find(|e| e.person_id == "bob").unwrap();
    assert_eq!(alice.rank, 1);
    assert_eq!(carol.rank, 1);
    assert_eq!(alice.percentile, carol.percentile);
    assert_eq!(bob.rank, 3);
    assert_eq!(bob.percentile, 0.0);
}
