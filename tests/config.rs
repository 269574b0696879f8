use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use iv_mirror::common::config::{
    ConfigError, ConfigOverrides, DEFAULT_INSTANCE, DEFAULT_PORT, InstanceKind, InstanceSet,
    resolve_config, validate_instance,
};
use iv_mirror::parser::SelectionPreference;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults_without_any_configuration() {
    let config = resolve_config(ConfigOverrides::default(), env_of(&[])).unwrap();

    for kind in InstanceKind::ALL {
        assert_eq!(config.instances.get(kind), &[DEFAULT_INSTANCE.to_string()]);
    }
    assert_eq!(config.preference, SelectionPreference::default());
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.listen_addr().to_string(), "127.0.0.1:5000");
}

#[test]
fn test_shared_and_per_kind_instance_lists() {
    let env = env_of(&[
        (
            "IV_MIRROR_INSTANCES",
            "https://a.example/, https://b.example",
        ),
        ("IV_MIRROR_SEARCH_INSTANCES", "https://search.example/"),
    ]);
    let config = resolve_config(ConfigOverrides::default(), env).unwrap();

    assert_eq!(
        config.instances.get(InstanceKind::Search),
        &["https://search.example".to_string()]
    );
    for kind in [InstanceKind::Video, InstanceKind::Comments, InstanceKind::Channel] {
        assert_eq!(
            config.instances.get(kind),
            &["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }
}

#[test]
fn test_invalid_and_duplicate_instances_are_dropped() {
    // 原来硬编码列表里出现过的几种坏地址
    let env = env_of(&[(
        "IV_MIRROR_INSTANCES",
        "https://lekker.gay/ ttps://invid-api.poketube.fun/ https://invidious.reallyaweso.me* \
         https://lekker.gay https://yewtu.be/ ftp://files.example",
    )]);
    let config = resolve_config(ConfigOverrides::default(), env).unwrap();

    assert_eq!(
        config.instances.get(InstanceKind::Video),
        &["https://lekker.gay".to_string(), "https://yewtu.be".to_string()]
    );
    assert_eq!(config.instances.primary(InstanceKind::Video), Some("https://lekker.gay"));
}

#[test]
fn test_all_invalid_instances_is_an_error() {
    let env = env_of(&[("IV_MIRROR_COMMENTS_INSTANCES", "ttps://broken.example")]);
    let err = resolve_config(ConfigOverrides::default(), env).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NoValidInstances(InstanceKind::Comments)
    ));
}

#[test]
fn test_overrides_take_priority_over_env() {
    let env = env_of(&[
        ("IV_MIRROR_INSTANCES", "https://env.example"),
        ("IV_MIRROR_VIDEO_INSTANCES", "https://env-video.example"),
        ("IV_MIRROR_PREFERENCE", "webm:*"),
        ("IV_MIRROR_HOST", "0.0.0.0"),
        ("IV_MIRROR_PORT", "9000"),
        ("IV_MIRROR_TIMEOUT_SECS", "30"),
    ]);
    let overrides = ConfigOverrides {
        instances: vec!["https://cli.example/".to_string()],
        preference: Some("mp4:1080p,mp4".to_string()),
        host: Some("::1".to_string()),
        port: Some(8081),
        timeout_secs: Some(3),
    };
    let config = resolve_config(overrides, env).unwrap();

    for kind in InstanceKind::ALL {
        assert_eq!(config.instances.get(kind), &["https://cli.example".to_string()]);
    }
    assert_eq!(config.preference.to_string(), "mp4:1080p,mp4:*");
    assert_eq!(config.listen_addr().to_string(), "[::1]:8081");
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[test]
fn test_env_values_are_used_without_overrides() {
    let env = env_of(&[
        ("IV_MIRROR_PREFERENCE", "webm:*"),
        ("IV_MIRROR_HOST", "0.0.0.0"),
        ("IV_MIRROR_PORT", "9000"),
        ("IV_MIRROR_TIMEOUT_SECS", "30"),
    ]);
    let config = resolve_config(ConfigOverrides::default(), env).unwrap();

    assert_eq!(config.preference.to_string(), "webm:*");
    assert_eq!(config.listen_addr().to_string(), "0.0.0.0:9000");
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_bad_values_are_errors() {
    let err = resolve_config(
        ConfigOverrides::default(),
        env_of(&[("IV_MIRROR_PORT", "eighty")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort(_)));

    let err = resolve_config(
        ConfigOverrides::default(),
        env_of(&[("IV_MIRROR_TIMEOUT_SECS", "0")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout(_)));

    let err = resolve_config(
        ConfigOverrides::default(),
        env_of(&[("IV_MIRROR_HOST", "localhost:80")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidHost(_)));

    // 主机名不做解析，错误信息要说明需要 IP
    let err = resolve_config(
        ConfigOverrides::default(),
        env_of(&[("IV_MIRROR_HOST", "localhost")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidHost(_)));
    assert!(err.to_string().contains("IP"), "{}", err);

    let err = resolve_config(
        ConfigOverrides::default(),
        env_of(&[("IV_MIRROR_PREFERENCE", ":720p")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPreference(_)));
}

#[test]
fn test_validate_instance() {
    assert_eq!(validate_instance("https://yewtu.be/").unwrap(), "https://yewtu.be");
    assert_eq!(
        validate_instance("http://127.0.0.1:3000").unwrap(),
        "http://127.0.0.1:3000"
    );
    assert_eq!(
        validate_instance("https://proxy.example/invidious/").unwrap(),
        "https://proxy.example/invidious"
    );
    assert!(validate_instance("ttps://invid-api.poketube.fun/").is_err());
    assert!(validate_instance("https://invidious.reallyaweso.me*").is_err());
    assert!(validate_instance("https://a.example/?q=1").is_err());
    assert!(validate_instance("lekker.gay").is_err());
}

#[test]
fn test_uniform_instance_set() {
    let set = InstanceSet::uniform(&["http://127.0.0.1:1/", "http://127.0.0.1:2"]).unwrap();
    for kind in InstanceKind::ALL {
        assert_eq!(set.get(kind).len(), 2);
    }
    assert!(InstanceSet::uniform(&["nope"]).is_err());
}
