use super::*;

fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_string())
}

#[test]
fn defaults_when_unset() {
    let cfg = HostConfig::from_lookup(vars(&[])).unwrap();
    assert_eq!(cfg, HostConfig { port: DEFAULT_PORT, api_origin: "http://127.0.0.1:8000".into() });
    assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn overrides_are_parsed_and_origin_trimmed() {
    let cfg = HostConfig::from_lookup(vars(&[("PORT", "8080"), ("PORTAL_API_ORIGIN", " https://api.example.test/ ")]))
        .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_origin, "https://api.example.test");
}

#[test]
fn blank_origin_falls_back_to_default() {
    let cfg = HostConfig::from_lookup(vars(&[("PORTAL_API_ORIGIN", "  ")])).unwrap();
    assert_eq!(cfg.api_origin, DEFAULT_API_ORIGIN);
}

#[test]
fn invalid_port_is_rejected() {
    let err = HostConfig::from_lookup(vars(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref value } if value == "eighty"));
    assert_eq!(err.to_string(), "invalid PORT: \"eighty\"");

    assert!(HostConfig::from_lookup(vars(&[("PORT", "70000")])).is_err());
}

#[test]
fn from_env_reads_process_environment() {
    // Only this test touches these variables.
    unsafe {
        std::env::set_var(PORT_VAR, "4100");
        std::env::set_var(API_ORIGIN_VAR, "http://backend.local:9000/");
    }

    let cfg = HostConfig::from_env().unwrap();
    assert_eq!(cfg.port, 4100);
    assert_eq!(cfg.api_origin, "http://backend.local:9000");

    unsafe {
        std::env::remove_var(PORT_VAR);
        std::env::remove_var(API_ORIGIN_VAR);
    }
}
