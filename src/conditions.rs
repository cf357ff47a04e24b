use std::error::Error;
use std::fs;
use std::path::Path;

use shaftx::ShaftSpec;
use tracing::info;

/// Load the shaft description for the CLI run.
///
/// Without a path the reference countershaft from [`ShaftSpec::default`] is used.
/// A JSON file only needs the fields it overrides; everything else keeps its
/// reference value.
pub fn load_shaft(path: Option<&Path>) -> Result<ShaftSpec, Box<dyn Error>> {
    let spec = match path {
        None => ShaftSpec::default(),
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let spec: ShaftSpec = serde_json::from_str(&text)?;
            info!(path = %path.display(), "loaded shaft description");
            spec
        }
    };

    // Validate early so a bad file is reported before any derived quantity.
    spec.validate()?;
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_reference_shaft() {
        let spec = load_shaft(None).expect("reference shaft loads");
        assert_eq!(spec, ShaftSpec::default());
    }

    #[test]
    fn reads_overrides_from_json() {
        let path = std::env::temp_dir().join(format!("shaftx-{}.json", std::process::id()));
        fs::write(&path, r#"{ "power_hp": 85.0 }"#).expect("temp file written");
        let spec = load_shaft(Some(&path)).expect("override loads");
        fs::remove_file(&path).expect("temp file removed");
        assert_eq!(spec.power_hp, 85.0);
        assert_eq!(spec.gears, ShaftSpec::default().gears);
    }

    #[test]
    fn rejects_invalid_json_values() {
        let path =
            std::env::temp_dir().join(format!("shaftx-bad-{}.json", std::process::id()));
        fs::write(&path, r#"{ "speed_rpm": 0.0 }"#).expect("temp file written");
        let error = load_shaft(Some(&path)).expect_err("zero speed rejected");
        fs::remove_file(&path).expect("temp file removed");
        assert!(error.to_string().contains("rotational speed"));
    }
}
