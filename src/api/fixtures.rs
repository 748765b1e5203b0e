//! Sample API documents shared by tests.

use serde_json::{Value, json};

use super::IpInfo;

/// A realistic `/api` document.
pub fn info_json(ip: &str, country: &str) -> Value {
    json!({
        "ip": ip,
        "type": if ip.contains(':') { "IPv6" } else { "IPv4" },
        "hostname": null,
        "location": {
            "country": country,
            "city": "Amsterdam",
            "region": "North Holland",
            "postalCode": "1012",
            "timezone": "Europe/Amsterdam",
            "latitude": "52.37403",
            "longitude": "4.88969"
        },
        "network": {
            "asn": 13335,
            "isp": "Example Transit B.V."
        },
        "connectionType": "residential",
        "cloudflare": {
            "colo": "AMS",
            "ray": "8a1b2c3d4e5f6a7b-AMS"
        }
    })
}

/// The decoded form of [`info_json`].
pub fn info(ip: &str, country: &str) -> IpInfo {
    IpInfo::from_document(info_json(ip, country)).unwrap()
}
