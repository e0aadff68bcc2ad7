use super::*;
use rand::Rng;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClubConfig::load(&dir.path().join("club.toml")).unwrap();
    assert_eq!(config, ClubConfig::default());
    assert_eq!(config.data_dir, PathBuf::from("data/tournaments"));
    assert_eq!(config.rounds_number, 4);
    assert_eq!(config.pairing, PairingPolicy::SeedOrder);
    assert_eq!(config.seed, None);
}

#[test]
fn test_file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.toml");
    fs::write(
        &path,
        r#"
data_dir = "/srv/club"
rounds_number = 6
pairing = "score-proximity"
seed = 42
"#,
    )
    .unwrap();

    let config = ClubConfig::load(&path).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/srv/club"));
    assert_eq!(config.rounds_number, 6);
    assert_eq!(config.pairing, PairingPolicy::ScoreProximity);
    assert_eq!(config.seed, Some(42));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.toml");
    fs::write(&path, "rounds_number = 5\n").unwrap();

    let config = ClubConfig::load(&path).unwrap();
    assert_eq!(config.rounds_number, 5);
    assert_eq!(config.data_dir, default_data_dir());
}

#[test]
fn test_unknown_pairing_policy_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.toml");
    fs::write(&path, "pairing = \"swiss\"\n").unwrap();

    assert!(matches!(
        ClubConfig::load(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_zero_rounds_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.toml");
    fs::write(&path, "rounds_number = 0\n").unwrap();

    assert!(matches!(ClubConfig::load(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_seeded_rng_is_reproducible() {
    let config = ClubConfig {
        seed: Some(7),
        ..ClubConfig::default()
    };
    let mut first = config.rng();
    let mut second = config.rng();
    let a: Vec<u64> = (0..4).map(|_| first.gen()).collect();
    let b: Vec<u64> = (0..4).map(|_| second.gen()).collect();
    assert_eq!(a, b);
}
