use crate::configuration::*;

use serde_json::json;
use serde_json::Value;

use std::time::Duration;

const FIELDS: [&str; 10] = [
    "ntp_server",
    "ntp_timezone",
    "ntp_timezone_descr",
    "sunset_enabled",
    "deepsleep",
    "deepsleeptime",
    "longitude",
    "latitude",
    "sunrise_offset",
    "sunset_offset",
];

fn utc_settings() -> Value {
    json!({
        "ntp_server": "pool.ntp.org",
        "ntp_timezone": "UTC",
        "ntp_timezone_descr": "Coordinated Universal Time",
        "sunset_enabled": true,
        "deepsleep": false,
        "deepsleeptime": 0,
        "longitude": "0.0",
        "latitude": "0.0",
        "sunrise_offset": 0,
        "sunset_offset": 0,
    })
}

#[test]
fn test_shape() {
    let config: NtpConfig = serde_json::from_value(utc_settings()).unwrap();

    let expected = NtpConfig {
        ntp_server: "pool.ntp.org".to_string(),
        ntp_timezone: "UTC".to_string(),
        ntp_timezone_descr: "Coordinated Universal Time".to_string(),
        sunset_enabled: true,
        deepsleep: false,
        deepsleeptime: 0,
        longitude: "0.0".to_string(),
        latitude: "0.0".to_string(),
        sunrise_offset: 0,
        sunset_offset: 0,
    };

    assert_eq!(expected, config);
}

#[test]
fn test_shape_validates() {
    let config: NtpConfig = serde_json::from_value(utc_settings()).unwrap();

    let valid = config.validate().unwrap();

    assert_eq!("UTC", valid.timezone.standard.name);
    assert_eq!(None, valid.timezone.daylight);
    assert_approx_eq!(0.0, valid.location.latitude);
}

#[test]
fn test_shape_missing_field() {
    for field in FIELDS {
        let mut settings = utc_settings();
        settings.as_object_mut().unwrap().remove(field);

        let error = serde_json::from_value::<NtpConfig>(settings).unwrap_err();

        assert_eq!(format!("missing field `{}`", field), error.to_string());
    }
}

#[test]
fn test_shape_wrong_type() {
    let mut settings = utc_settings();
    settings["deepsleep"] = json!("false");

    assert!(serde_json::from_value::<NtpConfig>(settings).is_err());

    let mut settings = utc_settings();
    settings["latitude"] = json!(0.0);

    assert!(serde_json::from_value::<NtpConfig>(settings).is_err());

    let mut settings = utc_settings();
    settings["deepsleeptime"] = json!(-1);

    assert!(serde_json::from_value::<NtpConfig>(settings).is_err());
}

#[test]
fn test_shape_extra_field() {
    let mut settings = utc_settings();
    settings["ntp_localtime"] = json!("2024-01-01 00:00:00");

    assert!(serde_json::from_value::<NtpConfig>(settings).is_ok());
}

#[test]
fn test_json() {
    let config = NtpConfig::default();

    let json = config.to_json().unwrap();

    assert_eq!(config, NtpConfig::from_json(&json).unwrap());
}

#[test]
fn test_from_json_invalid() {
    match NtpConfig::from_json("{}").err().unwrap() {
        ConfigurationError::Json(_) => (),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn test_validate_default() {
    let valid = NtpConfig::default().validate().unwrap();

    assert_eq!("pool.ntp.org", valid.server);
    assert_eq!("CET", valid.timezone.standard.name);
    assert_eq!("Europe/Berlin", valid.timezone_description);
    assert!(!valid.sunset_enabled);
    assert_approx_eq!(51.1657, valid.location.latitude);
    assert_approx_eq!(10.4515, valid.location.longitude);
    assert_eq!(None, valid.deep_sleep);
    assert_eq!(chrono::Duration::zero(), valid.sunrise_offset);
}

#[test]
fn test_validate_deep_sleep() {
    let config = NtpConfig {
        deepsleep: true,
        deepsleeptime: 3600,
        ..Default::default()
    };

    let valid = config.validate().unwrap();

    assert_eq!(Some(Duration::from_secs(3600)), valid.deep_sleep);
}

#[test]
fn test_validate_deep_sleep_zero() {
    let config = NtpConfig {
        deepsleep: true,
        deepsleeptime: 0,
        ..Default::default()
    };

    match config.validate().err().unwrap() {
        ConfigurationError::InvalidDeepSleepTime(t) => assert_eq!(0, t),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn test_validate_offsets() {
    let config = NtpConfig {
        sunrise_offset: -720,
        sunset_offset: 90,
        ..Default::default()
    };

    let valid = config.validate().unwrap();

    assert_eq!(chrono::Duration::hours(-12), valid.sunrise_offset);
    assert_eq!(chrono::Duration::minutes(90), valid.sunset_offset);

    let config = NtpConfig {
        sunrise_offset: 721,
        ..Default::default()
    };

    match config.validate().err().unwrap() {
        ConfigurationError::InvalidSunriseOffset(o) => assert_eq!(721, o),
        e => panic!("unexpected error {:?}", e),
    }

    let config = NtpConfig {
        sunset_offset: i32::MIN,
        ..Default::default()
    };

    match config.validate().err().unwrap() {
        ConfigurationError::InvalidSunsetOffset(o) => assert_eq!(i32::MIN, o),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn test_validate_server() {
    for server in ["", "pool ntp org", "a-very-long-ntp-server.example.com"] {
        let config = NtpConfig {
            ntp_server: server.to_string(),
            ..Default::default()
        };

        let error = config.validate().err().unwrap();

        assert_eq!(Some(9001), error.code());
    }
}

#[test]
fn test_validate_timezone() {
    let config = NtpConfig {
        ntp_timezone: "Europe/Berlin".to_string(),
        ..Default::default()
    };

    match config.validate().err().unwrap() {
        ConfigurationError::InvalidTimezone(tz, _) => assert_eq!("Europe/Berlin", tz),
        e => panic!("unexpected error {:?}", e),
    }

    let config = NtpConfig {
        ntp_timezone: "X".repeat(MAX_TIMEZONE_LEN + 1),
        ..Default::default()
    };

    assert_eq!(Some(9002), config.validate().err().unwrap().code());
}

#[test]
fn test_validate_timezone_description() {
    let config = NtpConfig {
        ntp_timezone_descr: String::new(),
        ..Default::default()
    };

    assert_eq!(Some(9004), config.validate().err().unwrap().code());
}

#[test]
fn test_validate_first_error_wins() {
    let config = NtpConfig {
        ntp_server: String::new(),
        latitude: "north".to_string(),
        ..Default::default()
    };

    assert_eq!(Some(9001), config.validate().err().unwrap().code());
}

#[test]
fn test_location() {
    let location = Location::parse(" -33.8688 ", "151.2093").unwrap();

    assert_approx_eq!(-33.8688, location.latitude);
    assert_approx_eq!(151.2093, location.longitude);
}

#[test]
fn test_location_out_of_range() {
    match Location::parse("90.5", "0").err().unwrap() {
        ConfigurationError::InvalidLatitude(l) => assert_eq!("90.5", l),
        e => panic!("unexpected error {:?}", e),
    }

    match Location::parse("0", "-180.1").err().unwrap() {
        ConfigurationError::InvalidLongitude(l) => assert_eq!("-180.1", l),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn test_location_not_a_number() {
    for text in ["", "NaN", "inf", "52,52", "52.5N"] {
        assert!(Location::parse(text, "0").is_err(), "accepted {:?}", text);
    }
}
