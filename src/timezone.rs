//! Viewer time zone selection.

use anyhow::Result;
use chrono_tz::Tz;

/// Zone to render times in: an explicit `--tz`, else the system zone, else UTC.
pub fn resolve(explicit: Option<&str>) -> Result<Tz> {
    if let Some(name) = explicit {
        return name
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Unknown time zone '{}': {}", name, e));
    }

    Ok(iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_zone_wins() {
        assert_eq!(resolve(Some("Europe/Zagreb")).unwrap(), Tz::Europe__Zagreb);
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let err = resolve(Some("Mars/Olympus_Mons")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn system_zone_never_fails() {
        assert!(resolve(None).is_ok());
    }
}
