//! Common constants used throughout samplegen.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["samplegen.json", "samplegen.yml", "samplegen.yaml"];

pub const DEFAULT_BINARY: &str = "operator-sdk";
pub const DEFAULT_DOMAIN: &str = "example.com";
pub const DEFAULT_IMAGE_REGISTRY: &str = "quay.io/example";
pub const IMAGE_TAG: &str = "v0.0.1";

/// Chart the Helm sample is created from, relative to the config file.
pub const DEFAULT_HELM_CHART: &str = "testdata/helm/memcached-0.0.2.tgz";
/// Mocks of the advanced molecule sample, relative to the config file.
pub const DEFAULT_TESTDATA_DIR: &str = "testdata/ansible";

/// Timestamp written into the bundle CSV so regenerated samples do not churn.
pub const DEFAULT_CREATED_AT: &str = "2022-11-08T17:26:37Z";

/// Environment every scaffolding command runs with.
pub const GO_MODULE_ENV: (&str, &str) = ("GO111MODULE", "on");

/// Keeps the helm plugin from reaching a live cluster when it derives RBAC rules.
pub const BROKEN_KUBECONFIG: (&str, &str) =
    ("KUBECONFIG", "broken_so_we_generate_static_default_rules");

pub const PROMETHEUS_OPERATOR_MODULE: &str = "github.com/prometheus-operator/prometheus-operator";
pub const PROMETHEUS_OPERATOR_VERSION: &str = "v0.59.0";

/// Labels the scaffolder adds to bundle metadata.
pub const METADATA_ANNOTATIONS: [&str; 3] = [
    "operators.operatorframework.io.metrics.builder",
    "operators.operatorframework.io.metrics.mediatype.v1",
    "operators.operatorframework.io.metrics.project_layout",
];

/// Annotations the scaffolder adds to ClusterServiceVersion manifests.
pub const MANIFEST_ANNOTATIONS: [&str; 2] = [
    "operators.operatorframework.io/builder",
    "operators.operatorframework.io/project_layout",
];
