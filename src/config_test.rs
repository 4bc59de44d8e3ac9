use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

const BASE: [(&str, &str); 3] =
    [("SUPABASE_URL", "https://demo.supabase.co/"), ("SUPABASE_ANON_KEY", "anon"), ("HOME", "/home/player")];

#[test]
fn from_lookup_applies_defaults() {
    let cfg = AppConfig::from_lookup(lookup_from(&BASE)).unwrap();
    assert_eq!(cfg.store.base_url, "https://demo.supabase.co");
    assert_eq!(cfg.store.api_key, "anon");
    assert_eq!(cfg.store.table, DEFAULT_TABLE);
    assert_eq!(
        cfg.store.timeouts,
        StoreTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.poll_interval, Duration::from_millis(5000));
    assert_eq!(cfg.identity_path, PathBuf::from("/home/player/.config/hokejpwg/hokejpwg_player.json"));
    assert_eq!(cfg.event, EventInfo::default());
}

#[test]
fn from_lookup_parses_overrides() {
    let mut pairs = BASE.to_vec();
    pairs.extend([
        ("HOKEJ_TABLE", "signups"),
        ("HOKEJ_POLL_INTERVAL_MS", "1500"),
        ("HOKEJ_REQUEST_TIMEOUT_SECS", "30"),
        ("HOKEJ_CONNECT_TIMEOUT_SECS", " 2 "),
        ("HOKEJ_IDENTITY_PATH", "/tmp/me.json"),
        ("HOKEJ_EVENT_TITLE", "Friday Ice"),
    ]);
    let cfg = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
    assert_eq!(cfg.store.table, "signups");
    assert_eq!(cfg.poll_interval, Duration::from_millis(1500));
    assert_eq!(cfg.store.timeouts, StoreTimeouts { request_secs: 30, connect_secs: 2 });
    assert_eq!(cfg.identity_path, PathBuf::from("/tmp/me.json"));
    assert_eq!(cfg.event.title, "Friday Ice");
    assert_eq!(cfg.event.subtitle, DEFAULT_EVENT_SUBTITLE);
}

#[test]
fn xdg_config_home_wins_over_home() {
    let mut pairs = BASE.to_vec();
    pairs.push(("XDG_CONFIG_HOME", "/xdg"));
    let cfg = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
    assert_eq!(cfg.identity_path, PathBuf::from("/xdg/hokejpwg/hokejpwg_player.json"));
}

#[test]
fn missing_url_errors() {
    let err = AppConfig::from_lookup(lookup_from(&[("SUPABASE_ANON_KEY", "anon")])).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { var: "SUPABASE_URL" });
}

#[test]
fn blank_key_counts_as_missing() {
    let err = AppConfig::from_lookup(lookup_from(&[("SUPABASE_URL", "https://x"), ("SUPABASE_ANON_KEY", "  ")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { var: "SUPABASE_ANON_KEY" });
}

#[test]
fn zero_poll_interval_is_rejected() {
    let mut pairs = BASE.to_vec();
    pairs.push(("HOKEJ_POLL_INTERVAL_MS", "0"));
    let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { var: "HOKEJ_POLL_INTERVAL_MS", .. }));
}

#[test]
fn non_numeric_timeout_is_rejected() {
    let mut pairs = BASE.to_vec();
    pairs.push(("HOKEJ_REQUEST_TIMEOUT_SECS", "soon"));
    let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidValue { var: "HOKEJ_REQUEST_TIMEOUT_SECS", value: "soon".to_owned() });
}

#[test]
fn no_home_and_no_override_errors() {
    let err =
        AppConfig::from_lookup(lookup_from(&[("SUPABASE_URL", "https://x"), ("SUPABASE_ANON_KEY", "k")])).unwrap_err();
    assert_eq!(err, ConfigError::NoIdentityPath);
}

#[test]
fn identity_path_needs_no_store_credentials() {
    let path = identity_path_from_lookup(lookup_from(&[("HOME", "/home/player")])).unwrap();
    assert_eq!(path, PathBuf::from("/home/player/.config/hokejpwg/hokejpwg_player.json"));

    let path = identity_path_from_lookup(lookup_from(&[("HOKEJ_IDENTITY_PATH", "/tmp/me.json")])).unwrap();
    assert_eq!(path, PathBuf::from("/tmp/me.json"));

    assert_eq!(identity_path_from_lookup(lookup_from(&[])).unwrap_err(), ConfigError::NoIdentityPath);
}
