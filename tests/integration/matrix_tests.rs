//! Capability matrix integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::MatrixFactory;
    use access_gate::{
        AiTier, Capability, CapabilityMatrix, FeatureKey, PlanTier, Role, Segment,
    };

    #[test]
    fn test_builtin_matrix_shape() {
        let matrix = CapabilityMatrix::builtin();

        for plan in PlanTier::ALL {
            assert!(
                matrix
                    .lookup(plan, Segment::Individual, Role::EndUser)
                    .is_some(),
                "{} individual end user",
                plan
            );
        }

        assert!(matrix
            .lookup(PlanTier::Freemium, Segment::TeamAdmin, Role::TeamAdmin)
            .is_none());
        assert!(matrix
            .lookup(PlanTier::Advanced, Segment::Individual, Role::PlatformAdmin)
            .is_none());
    }

    #[test]
    fn test_builtin_ai_values() {
        let matrix = CapabilityMatrix::builtin();
        let ai = |plan| {
            matrix
                .lookup(plan, Segment::Individual, Role::EndUser)
                .and_then(|set| set.get(FeatureKey::AiAccess))
        };

        assert_eq!(ai(PlanTier::Freemium), Some(Capability::Flag(false)));
        assert_eq!(ai(PlanTier::AdvancedTrial), Some(Capability::Ai(AiTier::BookingOnly)));
        assert_eq!(ai(PlanTier::Advanced), Some(Capability::Flag(true)));
        assert_eq!(ai(PlanTier::Professional), Some(Capability::Ai(AiTier::Full)));
    }

    #[test]
    fn test_matrix_yaml_round_trip() {
        let matrix = MatrixFactory::two_tier();
        let yaml = matrix.to_yaml().unwrap();
        let parsed = CapabilityMatrix::from_yaml_str(&yaml).unwrap();

        assert_eq!(parsed, matrix);
        assert_eq!(parsed.version(), "two-tier");
    }

    #[test]
    fn test_matrix_rejects_unknown_capability_value() {
        let yaml = r#"
plans:
  freemium:
    individual:
      end_user:
        dashboard: sometimes
"#;
        assert!(CapabilityMatrix::from_yaml_str(yaml).is_err());
    }
}
