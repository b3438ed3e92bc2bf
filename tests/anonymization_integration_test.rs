//! Integration tests for the anonymization engine on realistic configurations

use nos_config_collector::anonymization::{AnonymizationConfig, AnonymizationEngine, Redactor};
use std::net::Ipv4Addr;

const CISCO_CONFIG: &str = "\
hostname acme-core-1
!
enable secret 5 $1$mERr$hx5rVt7rPNoS4wqbXKX7m0
username admin privilege 15 password 7 0822455D0A16
!
interface GigabitEthernet0/1
 description uplink to acme-dc
 ip address 10.20.30.1 255.255.255.0
!
router ospf 1
 network 10.20.30.0 0.0.0.255 area 0
!
snmp-server community acmeRO RO
tacacs-server host 192.168.1.10 key s3cr3tKey
ip route 0.0.0.0 0.0.0.0 10.20.30.254
end";

fn engine() -> AnonymizationEngine {
    AnonymizationEngine::new(AnonymizationConfig::default()).unwrap()
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[test]
fn test_line_structure_preserved() {
    let result = engine()
        .anonymize_configuration(CISCO_CONFIG, &words(&["acme"]))
        .unwrap();

    assert_eq!(result.lines().count(), CISCO_CONFIG.lines().count());
    for (original, anonymized) in CISCO_CONFIG.lines().zip(result.lines()) {
        let indent = |s: &str| s.len() - s.trim_start().len();
        assert_eq!(indent(original), indent(anonymized));
        assert_eq!(
            original.split_whitespace().next(),
            anonymized.split_whitespace().next(),
            "keyword changed on line {original:?}"
        );
    }
}

#[test]
fn test_secrets_removed() {
    let result = engine()
        .anonymize_configuration(CISCO_CONFIG, &words(&["acme"]))
        .unwrap();

    for secret in [
        "$1$mERr$hx5rVt7rPNoS4wqbXKX7m0",
        "0822455D0A16",
        "acmeRO",
        "s3cr3tKey",
    ] {
        assert!(!result.contains(secret), "{secret} leaked");
    }
    assert!(!result.to_lowercase().contains("acme"));
    assert!(result.contains("enable secret 5 "));
    assert!(result.contains("password 7 "));
}

#[test]
fn test_masks_preserved_addresses_changed() {
    let result = engine().anonymize_configuration(CISCO_CONFIG, &[]).unwrap();

    assert!(result.contains(" 255.255.255.0"));
    assert!(result.contains(" 0.0.0.255 "));
    assert!(result.contains("ip route 0.0.0.0 0.0.0.0 "));
    assert!(!result.contains("10.20.30.1 "));
    assert!(!result.contains("192.168.1.10"));
}

#[test]
fn test_subnet_relationship_kept() {
    let result = engine()
        .anonymize_configuration("ip address 10.20.30.1\nip address 10.20.30.254", &[])
        .unwrap();
    let addresses: Vec<Ipv4Addr> = result
        .lines()
        .map(|l| l.rsplit(' ').next().unwrap().parse().unwrap())
        .collect();

    let shared = (u32::from(addresses[0]) ^ u32::from(addresses[1])).leading_zeros();
    assert!(shared >= 24, "anonymized addresses left the /24");
}

#[test]
fn test_anonymization_is_deterministic_per_salt() {
    let a = engine().anonymize_configuration(CISCO_CONFIG, &[]).unwrap();
    let b = engine().anonymize_configuration(CISCO_CONFIG, &[]).unwrap();
    assert_eq!(a, b);

    let other = AnonymizationEngine::new(AnonymizationConfig {
        salt: "different".to_string(),
        ..AnonymizationConfig::default()
    })
    .unwrap()
    .anonymize_configuration(CISCO_CONFIG, &[])
    .unwrap();
    assert_ne!(a, other);
}

#[test]
fn test_redactor_ignores_blank_words() {
    let redactor: &dyn Redactor = &engine();
    let content = "hostname test-device";
    assert_eq!(
        redactor.redact(content, &words(&["", "   "])).unwrap(),
        content
    );
}

#[test]
fn test_trailing_newline_dropped() {
    let result = engine()
        .anonymize_configuration("hostname r1\n", &[])
        .unwrap();
    assert_eq!(result, "hostname r1");
}

#[test]
fn test_every_hex_digit_as_sensitive_word() {
    let hex: Vec<String> = "0123456789abcdef".chars().map(String::from).collect();
    let result = engine()
        .anonymize_configuration("hostname edge-1\nbanner motd deadbeef", &hex)
        .unwrap();

    assert_eq!(result.lines().count(), 2);
    assert!(!result.to_lowercase().chars().any(|c| c.is_ascii_hexdigit()));
}
