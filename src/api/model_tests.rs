//! Tests for the API documents.

use serde_json::json;

use super::fixtures::{info, info_json};
use super::{ConnectionReport, ConnectionType, IpInfo, Scalar};

mod ip_info {
    use super::*;

    #[test]
    fn decodes_full_document() {
        let info = info("203.0.113.5", "NL");

        assert_eq!(info.ip, "203.0.113.5");
        assert_eq!(info.kind, "IPv4");
        assert_eq!(info.location.city, "Amsterdam");
        assert_eq!(info.location.country, "NL");
        assert_eq!(info.location.timezone.as_deref(), Some("Europe/Amsterdam"));
        assert_eq!(info.network.isp, "Example Transit B.V.");
        assert_eq!(info.network.asn.as_ref().unwrap().to_string(), "13335");
        assert_eq!(info.connection_type, Some(ConnectionType::Residential));
        assert_eq!(info.cloudflare.unwrap().colo.as_deref(), Some("AMS"));
    }

    #[test]
    fn place_joins_city_and_country() {
        assert_eq!(info("203.0.113.5", "NL").place(), "Amsterdam, NL");
    }

    #[test]
    fn missing_required_field_fails_to_decode() {
        let mut doc = info_json("203.0.113.5", "NL");
        doc["network"].as_object_mut().unwrap().remove("isp");

        let err = serde_json::from_value::<IpInfo>(doc).unwrap_err();

        assert!(err.to_string().contains("isp"));
    }

    #[test]
    fn missing_optional_fields_are_none() {
        let doc = json!({
            "ip": "2001:db8::1",
            "type": "IPv6",
            "location": {"city": "Berlin", "country": "DE"},
            "network": {"isp": "Example"}
        });

        let info: IpInfo = serde_json::from_value(doc).unwrap();

        assert!(info.connection_type.is_none());
        assert!(info.cloudflare.is_none());
        assert!(info.location.region.is_none());
        assert_eq!(info.connection_label(), "unknown");
    }

    #[test]
    fn unknown_fields_survive_reencoding() {
        let original = info_json("203.0.113.5", "NL");
        let decoded: IpInfo = serde_json::from_value(original.clone()).unwrap();

        let reencoded = serde_json::to_value(&decoded).unwrap();

        assert_eq!(reencoded, original);
    }

    #[test]
    fn from_document_keeps_explicit_nulls() {
        let mut doc = info_json("203.0.113.5", "NL");
        doc["provider"] = serde_json::Value::Null;
        doc["connectionType"] = serde_json::Value::Null;

        let info = IpInfo::from_document(doc.clone()).unwrap();

        assert!(info.provider.is_none());
        assert!(info.connection_type.is_none());
        assert_eq!(info.document(), Some(&doc));
    }

    #[test]
    fn from_document_rejects_missing_required_field() {
        let mut doc = info_json("203.0.113.5", "NL");
        doc.as_object_mut().unwrap().remove("location");

        assert!(IpInfo::from_document(doc).is_err());
    }
}

mod connection_type {
    use super::*;

    #[test]
    fn parses_known_values() {
        assert_eq!(ConnectionType::from("residential"), ConnectionType::Residential);
        assert_eq!(ConnectionType::from("datacenter"), ConnectionType::Datacenter);
        assert_eq!(ConnectionType::from("vpn"), ConnectionType::Vpn);
        assert_eq!(ConnectionType::from("tor"), ConnectionType::Tor);
        assert_eq!(ConnectionType::from("unknown"), ConnectionType::Unknown);
    }

    #[test]
    fn preserves_unrecognized_values() {
        let kind = ConnectionType::from("mobile");

        assert_eq!(kind, ConnectionType::Other("mobile".to_string()));
        assert_eq!(kind.to_string(), "mobile");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            ConnectionType::from("VPN"),
            ConnectionType::Other("VPN".to_string())
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let value = serde_json::to_value(ConnectionType::Datacenter).unwrap();
        assert_eq!(value, json!("datacenter"));

        let other = serde_json::to_value(ConnectionType::Other("mobile".into())).unwrap();
        assert_eq!(other, json!("mobile"));
    }
}

mod connection_report {
    use super::*;

    #[test]
    fn decodes_empty_document() {
        let report: ConnectionReport = serde_json::from_value(json!({})).unwrap();
        assert_eq!(report, ConnectionReport::default());
    }

    #[test]
    fn decodes_string_or_numeric_asn() {
        let numeric: ConnectionReport = serde_json::from_value(json!({"asn": 16509})).unwrap();
        let text: ConnectionReport = serde_json::from_value(json!({"asn": "AS16509"})).unwrap();

        assert!(matches!(numeric.asn, Some(Scalar::Number(_))));
        assert_eq!(text.asn, Some(Scalar::Text("AS16509".to_string())));
    }

    #[test]
    fn decodes_camel_case_fields() {
        let report: ConnectionReport = serde_json::from_value(json!({
            "ip": "198.51.100.7",
            "connectionType": "datacenter",
            "provider": "Example Cloud"
        }))
        .unwrap();

        assert_eq!(report.ip.as_deref(), Some("198.51.100.7"));
        assert_eq!(report.connection_type, Some(ConnectionType::Datacenter));
        assert_eq!(report.provider.as_deref(), Some("Example Cloud"));
    }
}
