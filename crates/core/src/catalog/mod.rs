//! Built-in stage catalog and static reference data.
//!
//! The catalog is the ordered list of stages the simulator walks
//! through. Build history and environments are display-only reference
//! data shown alongside the pipeline; nothing in the core ever mutates
//! them.

use pb_protocol::{BuildRecord, BuildStatus, Environment, StageDefinition};

fn stage(id: &str, name: &str, icon: &str, nominal_duration: &str) -> StageDefinition {
    StageDefinition {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        nominal_duration: nominal_duration.to_string(),
    }
}

/// The default stage catalog, used when `.pipeboard/stages.yaml` is absent.
pub fn default_stages() -> Vec<StageDefinition> {
    vec![
        stage("checkout", "Checkout", "🔍", "5s"),
        stage("build", "Build", "🔨", "45s"),
        stage("test", "Test", "🧪", "2m 30s"),
        stage("analysis", "Code Analysis", "📊", "1m 15s"),
        stage("package", "Package", "📦", "30s"),
        stage("deploy", "Deploy", "🚀", "1m"),
    ]
}

fn build(number: u32, branch: &str, status: BuildStatus, commit: &str, time: &str, duration: &str) -> BuildRecord {
    BuildRecord {
        number,
        branch: branch.to_string(),
        status,
        commit: commit.to_string(),
        time: time.to_string(),
        duration: duration.to_string(),
    }
}

/// Static build-history records, newest first.
pub fn build_history() -> Vec<BuildRecord> {
    vec![
        build(42, "main", BuildStatus::Success, "a1b2c3d", "5 min ago", "5m 45s"),
        build(41, "feature/auth", BuildStatus::Success, "e4f5g6h", "1 hour ago", "6m 12s"),
        build(40, "develop", BuildStatus::Failed, "i7j8k9l", "2 hours ago", "3m 22s"),
        build(39, "main", BuildStatus::Success, "m0n1o2p", "3 hours ago", "5m 58s"),
        build(38, "hotfix/bug-123", BuildStatus::Success, "q3r4s5t", "5 hours ago", "4m 30s"),
    ]
}

fn env(id: &str, name: &str, version: &str, url: &str) -> Environment {
    Environment {
        id: id.to_string(),
        name: name.to_string(),
        status: "deployed".to_string(),
        version: version.to_string(),
        url: url.to_string(),
    }
}

/// Static deployment environment cards.
pub fn environments() -> Vec<Environment> {
    vec![
        env("dev", "Development", "v1.4.2-dev", "dev.myapp.com"),
        env("staging", "Staging", "v1.4.1", "staging.myapp.com"),
        env("prod", "Production", "v1.4.0", "myapp.com"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_stages_have_unique_ids() {
        let stages = default_stages();
        let ids: HashSet<&str> = stages.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), stages.len());
    }

    #[test]
    fn test_default_catalog_order() {
        let ids: Vec<String> = default_stages().into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec!["checkout", "build", "test", "analysis", "package", "deploy"]
        );
    }

    #[test]
    fn test_build_history_is_newest_first() {
        let builds = build_history();
        assert!(builds.windows(2).all(|w| w[0].number > w[1].number));
    }

    #[test]
    fn test_environments_cover_dev_staging_prod() {
        let ids: Vec<String> = environments().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["dev", "staging", "prod"]);
    }
}
