use serde::{Deserialize, Serialize};

/// Outcome of running detection against one application directory.
///
/// `Fail` is ordinary non-applicability and carries the reason shown to the
/// user; infrastructure failures travel on the `Err` arm of the detect
/// function instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectOutcome {
    Pass(BuildPlan),
    Fail(String),
}

/// The requirement list handed back to the lifecycle when detection passes.
/// Serializes to the build plan TOML the platform expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub requires: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub metadata: RequirementMetadata,
}

/// Only one metadata key is ever used by this buildpack, so it is a struct
/// rather than an open-ended table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementMetadata {
    pub launch: bool,
}

impl Requirement {
    pub fn new(name: impl Into<String>, launch: bool) -> Self {
        Requirement {
            name: name.into(),
            metadata: RequirementMetadata { launch },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_plan_serializes_to_requires_tables() {
        let plan = BuildPlan {
            requires: vec![
                Requirement::new("node", true),
                Requirement::new("node-modules", false),
            ],
        };

        let rendered = toml::to_string(&plan).unwrap();
        assert!(rendered.contains("[[requires]]"));
        assert!(rendered.contains("name = \"node\""));
        assert!(rendered.contains("launch = true"));
        assert!(rendered.contains("launch = false"));

        let parsed: BuildPlan = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, plan);
    }
}
