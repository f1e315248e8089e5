//! Configuration integration tests
//!
//! Configuration files and environment layers feeding a working engine.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::IdentityFactory;
    use crate::{assert_err, assert_ok};
    use access_gate::config::{UnknownFeaturePolicy, Validate};
    use access_gate::{AccessEngine, Config, FeatureKey, GateError, PlanHierarchy, PlanTier};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_engine_from_config_file() {
        let matrix = write_temp(
            r#"
version: "2024-07"
plans:
  advanced:
    individual:
      end_user:
        dashboard: true
        csvExport: 2
        aiAccess: booking_only
"#,
        );

        let config_file = write_temp(&format!(
            r#"
access:
  hierarchy: standard
  unknown_feature_policy: deny
  matrix_path: {:?}
features:
  - feature: export
    required_plan: advanced
    usage_limit: 1
    usage_period: day
"#,
            matrix.path()
        ));

        let config = assert_ok!(Config::from_file(config_file.path()).await);
        let engine = assert_ok!(AccessEngine::from_config(&config).await);
        assert_eq!(engine.matrix().version(), "2024-07");
        assert_eq!(engine.hierarchy(), PlanHierarchy::Standard);

        let user = IdentityFactory::end_user(PlanTier::Advanced);
        assert!(engine.check_feature(Some(&user), FeatureKey::CsvExport).allowed());
        assert!(!engine.check_feature(Some(&user), FeatureKey::Analytics).allowed());

        assert!(engine.check_requirement(Some(&user), "export").allowed());
        assert!(!engine.check_requirement(Some(&user), "orgSettings").allowed());
        assert_eq!(
            config.access().unknown_feature_policy,
            UnknownFeaturePolicy::Deny
        );
    }

    #[tokio::test]
    async fn test_engine_from_config_with_bad_matrix() {
        let matrix = write_temp("plans:\n  freemium:\n    individual:\n      end_user:\n        holograms: true\n");
        let mut config = Config::default();
        config.access.matrix_path = Some(matrix.path().to_path_buf());

        let error = assert_err!(AccessEngine::from_config(&config).await);
        assert!(matches!(error, GateError::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let file = write_temp(
            r#"
features:
  - feature: export
  - feature: export
"#,
        );
        let error = assert_err!(Config::from_file(file.path()).await);
        assert!(error.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let config = Config::default();
        assert!(config.logging().validate().is_ok());

        let yaml = assert_ok!(config.to_yaml());
        let parsed = assert_ok!(Config::from_yaml_str(&yaml));
        assert_eq!(parsed.features(), config.features());
        assert_eq!(parsed.usage().cleanup_interval_secs, 3600);
    }
}
