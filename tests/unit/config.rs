use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_are_parallel_with_system_fonts() {
    let s = StripSettings::default();
    assert!(s.parallel);
    assert!(s.threads.is_none());
    assert!(s.load_system_fonts);
    assert!(s.font_dirs.is_empty());
}

#[test]
fn env_overrides_apply() {
    let s = StripSettings::default().with_env_overrides(env(&[
        ("PIKURA_PARALLEL", "false"),
        ("PIKURA_THREADS", "3"),
        ("PIKURA_FONT_DIR", "fonts"),
    ]));
    assert!(!s.parallel);
    assert_eq!(s.threads, Some(3));
    assert_eq!(s.font_dirs, vec![PathBuf::from("fonts")]);
}

#[test]
fn invalid_env_values_keep_defaults() {
    let s = StripSettings::default().with_env_overrides(env(&[
        ("PIKURA_THREADS", "0"),
        ("PIKURA_PARALLEL", "yes"),
    ]));
    assert!(s.parallel);
    assert!(s.threads.is_none());

    let s = StripSettings::default().with_env_overrides(env(&[("PIKURA_THREADS", "lots")]));
    assert!(s.threads.is_none());
}

#[test]
fn zero_threads_is_rejected_when_building_pool() {
    let s = StripSettings {
        threads: Some(0),
        ..StripSettings::default()
    };
    assert!(s.build_thread_pool().is_err());

    let s = StripSettings {
        threads: Some(2),
        ..StripSettings::default()
    };
    assert_eq!(s.build_thread_pool().unwrap().current_num_threads(), 2);
}
